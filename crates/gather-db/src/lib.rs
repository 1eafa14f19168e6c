//! # gather-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `gather-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations, including transactional registration admission
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gather_db::{create_pool, run_migrations, PoolConfig, PgRegistrationRepository};
//!
//! async fn example(config: &gather_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from(config)).await?;
//!     run_migrations(&pool).await?;
//!     let registrations = PgRegistrationRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgGatheringRepository, PgHealthCheck, PgMemberGroupRepository, PgMemberRepository,
    PgRegistrationRepository, PgUserRepository,
};

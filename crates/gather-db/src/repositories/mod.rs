//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in gather-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod gathering;
mod health;
mod member;
mod member_group;
mod registration;
mod sql;
mod user;

pub use gathering::PgGatheringRepository;
pub use health::PgHealthCheck;
pub use member::PgMemberRepository;
pub use member_group::PgMemberGroupRepository;
pub use registration::PgRegistrationRepository;
pub use user::PgUserRepository;

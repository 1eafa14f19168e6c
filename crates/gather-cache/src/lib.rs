//! # gather-cache
//!
//! Short-lived caching of the public gathering listings.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Redis Store**: Listing cache shared across server instances
//! - **Local Store**: In-process fallback when no Redis is configured
//!
//! ## Example
//!
//! ```ignore
//! use gather_cache::{RedisPool, RedisPoolConfig, RedisListingCache};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let cache = RedisListingCache::new(pool, Duration::from_secs(10));
//!
//! cache.put(CacheKey::ActiveGatherings, payload).await?;
//! cache.invalidate_all().await?;
//! ```

pub mod listing;
pub mod pool;

pub use listing::{LocalListingCache, RedisListingCache};
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

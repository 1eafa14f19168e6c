//! Stores implementing [`gather_core::GatheringListCache`].

mod local_store;
mod redis_store;

pub use local_store::LocalListingCache;
pub use redis_store::RedisListingCache;

//! Redis-backed listing cache.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use gather_core::error::DomainError;
use gather_core::traits::{CacheKey, GatheringListCache, RepoResult};

use crate::pool::{RedisPool, RedisPoolError};

/// Listing cache shared by every server instance pointing at the same Redis
#[derive(Debug, Clone)]
pub struct RedisListingCache {
    pool: RedisPool,
    ttl: Duration,
}

impl RedisListingCache {
    pub fn new(pool: RedisPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Redis rejects `SETEX` with a zero expiry
    fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs().max(1)
    }
}

fn cache_error(err: RedisPoolError) -> DomainError {
    DomainError::CacheError(err.to_string())
}

#[async_trait]
impl GatheringListCache for RedisListingCache {
    async fn get(&self, key: CacheKey) -> RepoResult<Option<String>> {
        let value = self
            .pool
            .fetch(key.as_str())
            .await
            .map_err(cache_error)?;
        debug!(key = key.as_str(), hit = value.is_some(), "Listing cache lookup");
        Ok(value)
    }

    async fn put(&self, key: CacheKey, payload: String) -> RepoResult<()> {
        self.pool
            .store(key.as_str(), &payload, self.ttl_secs())
            .await
            .map_err(cache_error)
    }

    async fn invalidate_all(&self) -> RepoResult<()> {
        let keys: Vec<&str> = CacheKey::ALL.iter().map(|k| k.as_str()).collect();
        let removed = self.pool.evict(&keys).await.map_err(cache_error)?;
        debug!(removed, "Listing cache invalidated");
        Ok(())
    }

    async fn ping(&self) -> RepoResult<()> {
        self.pool.ping().await.map_err(cache_error)
    }
}

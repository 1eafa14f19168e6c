//! Cache port for the public gathering listings
//!
//! Entries expire after a bounded time-to-live and are dropped explicitly
//! whenever a gathering or registration is written.

use async_trait::async_trait;

use super::repositories::RepoResult;

/// Cached listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    ActiveGatherings,
    GatheringsWithRegistrations,
}

impl CacheKey {
    pub const ALL: [Self; 2] = [Self::ActiveGatherings, Self::GatheringsWithRegistrations];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActiveGatherings => "gatherings:active",
            Self::GatheringsWithRegistrations => "gatherings:with-registrations",
        }
    }
}

#[async_trait]
pub trait GatheringListCache: Send + Sync {
    /// Get a serialized listing if present and not expired
    async fn get(&self, key: CacheKey) -> RepoResult<Option<String>>;

    /// Store a serialized listing for the configured TTL
    async fn put(&self, key: CacheKey, payload: String) -> RepoResult<()>;

    /// Drop every cached listing
    async fn invalidate_all(&self) -> RepoResult<()>;

    /// Round-trip to the cache backend
    async fn ping(&self) -> RepoResult<()>;
}

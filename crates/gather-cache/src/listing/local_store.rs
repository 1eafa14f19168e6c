//! In-process listing cache used when no Redis is configured.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::warn;

use gather_core::traits::{CacheKey, GatheringListCache, RepoResult};

struct Entry {
    payload: String,
    expires_at: Instant,
}

/// Listing cache private to this process
pub struct LocalListingCache {
    entries: Mutex<HashMap<CacheKey, Entry>>,
    ttl: Duration,
}

impl LocalListingCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lookup(&self, key: CacheKey, now: Instant) -> Option<String> {
        let mut entries = self.entries.lock();
        match entries.get(&key) {
            Some(entry) if entry.expires_at > now => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }
}

impl std::fmt::Debug for LocalListingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalListingCache")
            .field("entries", &self.entries.lock().len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[async_trait]
impl GatheringListCache for LocalListingCache {
    async fn get(&self, key: CacheKey) -> RepoResult<Option<String>> {
        Ok(self.lookup(key, Instant::now()))
    }

    async fn put(&self, key: CacheKey, payload: String) -> RepoResult<()> {
        let Some(expires_at) = Instant::now().checked_add(self.ttl) else {
            warn!(ttl = ?self.ttl, "Listing cache TTL out of range; not caching");
            return Ok(());
        };
        self.entries
            .lock()
            .insert(key, Entry { payload, expires_at });
        Ok(())
    }

    async fn invalidate_all(&self) -> RepoResult<()> {
        self.entries.lock().clear();
        Ok(())
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

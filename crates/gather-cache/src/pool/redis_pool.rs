//! deadpool-redis pool with every key scoped under one namespace.

use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;

/// Prefix applied to every key this crate writes
pub const DEFAULT_NAMESPACE: &str = "gather";

#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    pub url: String,
    pub max_connections: usize,
    /// Keys are stored as `{namespace}:{key}`
    pub namespace: String,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 8,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl From<&gather_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &gather_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Invalid Redis pool settings: {0}")]
    Build(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Host part of a Redis URL, without user or password
fn redacted(url: &str) -> &str {
    match url.rsplit_once('@') {
        Some((_, host)) => host,
        None => url.strip_prefix("redis://").unwrap_or(url),
    }
}

#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
    namespace: String,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("namespace", &self.namespace)
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

impl RedisPool {
    /// Build the pool. No connection is opened until the first command.
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map(|builder| {
                builder
                    .max_size(config.max_connections)
                    .runtime(Runtime::Tokio1)
            })
            .map_err(|e| RedisPoolError::Build(e.to_string()))?
            .build()
            .map_err(|e| RedisPoolError::Build(e.to_string()))?;

        tracing::info!(
            host = redacted(&config.url),
            namespace = %config.namespace,
            max_connections = config.max_connections,
            "Redis pool ready"
        );

        Ok(Self {
            pool,
            namespace: config.namespace,
        })
    }

    pub fn from_config(config: &gather_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}:{key}", self.namespace)
    }

    async fn connection(&self) -> RedisResult<Connection> {
        Ok(self.pool.get().await?)
    }

    pub async fn ping(&self) -> RedisResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    pub async fn fetch(&self, key: &str) -> RedisResult<Option<String>> {
        let mut conn = self.connection().await?;
        Ok(conn.get(self.scoped(key)).await?)
    }

    /// `SET` with an expiry; `ttl_secs` must be non-zero
    pub async fn store(&self, key: &str, value: &str, ttl_secs: u64) -> RedisResult<()> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(self.scoped(key), value, ttl_secs)
            .await?;
        Ok(())
    }

    /// Delete `keys` in one round trip, returning how many existed
    pub async fn evict(&self, keys: &[&str]) -> RedisResult<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        let scoped: Vec<String> = keys.iter().map(|k| self.scoped(k)).collect();
        let mut conn = self.connection().await?;
        Ok(conn.del(scoped).await?)
    }
}

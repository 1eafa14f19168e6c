//! Configuration structs

mod app_config;

pub use app_config::{
    AdminBootstrapConfig, AdmissionConfig, AppConfig, AppSettings, CacheConfig, ConfigError,
    CorsConfig, DatabaseConfig, Environment, JwtConfig, RateLimitConfig, RedisConfig,
    ServerConfig, MAX_CACHE_TTL_SECS,
};

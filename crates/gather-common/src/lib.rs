//! # gather-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{validate_password_strength, AccessToken, Claims, JwtService, PasswordService};
pub use config::{
    AdminBootstrapConfig, AdmissionConfig, AppConfig, AppSettings, CacheConfig, ConfigError,
    CorsConfig, DatabaseConfig, Environment, JwtConfig, RateLimitConfig, RedisConfig,
    ServerConfig,
};
pub use error::{domain_status, AppError, AppResult, ErrorResponse};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, LogFormat, TracingConfig, TracingError,
};

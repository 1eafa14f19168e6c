//! Global `tracing` subscriber
//!
//! `RUST_LOG` wins when set; otherwise the filter comes from [`TracingConfig`].

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, with source locations
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,
    pub format: LogFormat,
    /// Log span open/close, which shows per-request timings
    pub span_events: bool,
}

impl TracingConfig {
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                filter: "debug,sqlx=info,hyper=info".to_string(),
                format: LogFormat::Pretty,
                span_events: true,
            },
            Environment::Staging => Self {
                filter: "info,sqlx=warn".to_string(),
                format: LogFormat::Pretty,
                span_events: false,
            },
            Environment::Production => Self {
                filter: "info,sqlx=warn".to_string(),
                format: LogFormat::Json,
                span_events: false,
            },
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Staging)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

/// Install the global subscriber. Fails if one is already installed.
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_events(config.span_events()),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(config.span_events()),
            )
            .try_init(),
    };

    installed.map_err(|_| TracingError::AlreadyInitialized)
}

/// [`try_init_tracing_with_config`] with staging defaults
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(TracingConfig::default())
}

//! Shared handler state

use std::sync::Arc;

use gather_common::AppConfig;
use gather_service::dto::ReadinessResponse;
use gather_service::ServiceContext;
use tracing::warn;

/// Cloned into every request; both halves are behind `Arc`.
#[derive(Clone, Debug)]
pub struct AppState {
    ctx: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(ctx: ServiceContext, config: AppConfig) -> Self {
        Self {
            ctx: Arc::new(ctx),
            config: Arc::new(config),
        }
    }

    /// Repositories, listing cache and auth services
    pub fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Probe the store and the listing cache.
    ///
    /// Failures are logged and reported as `false` rather than returned.
    pub async fn readiness(&self) -> ReadinessResponse {
        let database = match self.ctx.store_health().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Store readiness probe failed");
                false
            }
        };

        let cache = match self.ctx.listing_cache().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Listing cache readiness probe failed");
                false
            }
        };

        ReadinessResponse::new(database, cache)
    }
}

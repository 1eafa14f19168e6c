//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use gather_cache::{LocalListingCache, RedisListingCache, RedisPool};
use gather_common::{AppConfig, AppError, JwtService};
use gather_core::GatheringListCache;
use gather_db::{
    create_pool, run_migrations, PgGatheringRepository, PgHealthCheck, PgMemberGroupRepository,
    PgMemberRepository, PgRegistrationRepository, PgUserRepository, PoolConfig,
};
use gather_service::{AuthService, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let api = apply_middleware(create_router(), state.config());
    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let listing_cache = create_listing_cache(&config)?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .gathering_repo(Arc::new(PgGatheringRepository::new(pool.clone())))
        .group_repo(Arc::new(PgMemberGroupRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .registration_repo(Arc::new(PgRegistrationRepository::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .store_health(Arc::new(PgHealthCheck::new(pool)))
        .listing_cache(listing_cache)
        .jwt_service(jwt_service)
        .capacity_policy(config.admission.capacity_policy)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(admin) = config.admin.as_ref() {
        let created = AuthService::new(&service_context)
            .ensure_admin(admin)
            .await
            .map_err(|e| AppError::Config(format!("Failed to bootstrap administrator: {e}")))?;
        if created {
            info!(email = %admin.email, "Administrator account bootstrapped");
        }
    } else {
        warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set; no administrator is bootstrapped");
    }

    Ok(AppState::new(service_context, config))
}

/// Redis when `REDIS_URL` is configured, otherwise an in-process cache
fn create_listing_cache(config: &AppConfig) -> Result<Arc<dyn GatheringListCache>, AppError> {
    let ttl = Duration::from_secs(config.cache.active_gatherings_ttl_secs);

    match config.redis.as_ref() {
        Some(redis) => {
            info!("Using Redis for the listing cache");
            let pool = RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            Ok(Arc::new(RedisListingCache::new(pool, ttl)))
        }
        None => {
            info!("REDIS_URL not set; using the in-process listing cache");
            Ok(Arc::new(LocalListingCache::new(ttl)))
        }
    }
}

/// Run the HTTP server until Ctrl-C
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let addr = tokio::net::lookup_host(&address)
        .await
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT {address}: {e}")))?
        .next()
        .ok_or_else(|| AppError::Config(format!("{address} did not resolve")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}

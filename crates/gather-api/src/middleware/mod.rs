//! HTTP middleware for the `/api` routes
//!
//! Health probes are merged outside this stack so they are never rate
//! limited or timed out.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use gather_common::{AppConfig, CorsConfig, RateLimitConfig};
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Upper bound on a single request, admission included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wrap `router` in request ids, tracing, a timeout, CORS and the rate limit.
///
/// Outermost first: rate limit, request id, trace, timeout, CORS.
pub fn apply_middleware(router: Router<AppState>, config: &AppConfig) -> Router<AppState> {
    let stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        .layer(cors_layer(&config.cors, config.app.env.is_production()));

    with_rate_limit(router.layer(stack), &config.rate_limit)
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id,
    )
}

/// One token bucket shared by every client.
///
/// A zero rate or burst cannot build a governor; requests are then let through.
fn with_rate_limit(router: Router<AppState>, limits: &RateLimitConfig) -> Router<AppState> {
    let governor = GovernorConfigBuilder::default()
        .per_second(limits.requests_per_second.into())
        .burst_size(limits.burst)
        .key_extractor(GlobalKeyExtractor)
        .finish();

    let Some(governor) = governor else {
        warn!(
            requests_per_second = limits.requests_per_second,
            burst = limits.burst,
            "Rate limiting disabled by configuration"
        );
        return router;
    };

    router.layer(GovernorLayer {
        config: Arc::new(governor),
    })
}

fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, request_id_header()])
        .expose_headers([request_id_header()]);

    if config.allowed_origins.is_empty() {
        if is_production {
            warn!("CORS_ALLOWED_ORIGINS is empty; cross-origin requests will be refused");
        } else {
            return layer.allow_origin(Any);
        }
    }

    let origins = parse_origins(&config.allowed_origins);
    info!(count = origins.len(), "CORS origins configured");
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Parse origins into header values, skipping malformed ones
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

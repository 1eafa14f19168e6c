//! Route definitions
//!
//! All API routes organized by resource and mounted under /api.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{auth, gatherings, health, member_groups, members, registrations, users};
use crate::state::AppState;

/// Create the main API router (health probes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(registration_routes())
        .merge(gathering_routes())
        .merge(member_group_routes())
        .merge(member_routes())
        .merge(user_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(auth::login))
}

/// Registration routes; submission and available-members are public
fn registration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/registrations",
            get(registrations::list_registrations).post(registrations::submit_registration),
        )
        .route(
            "/registrations/available-members",
            get(registrations::available_members),
        )
        .route(
            "/registrations/:id",
            put(registrations::update_registration_status)
                .delete(registrations::delete_registration),
        )
}

/// Gathering routes; the two listings are public
fn gathering_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/gatherings",
            get(gatherings::list_gatherings).post(gatherings::create_gathering),
        )
        .route("/gatherings/active", get(gatherings::list_active_gatherings))
        .route(
            "/gatherings/with-registrations",
            get(gatherings::list_gatherings_with_registrations),
        )
        .route(
            "/gatherings/:id",
            put(gatherings::update_gathering).delete(gatherings::delete_gathering),
        )
}

fn member_group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/member-groups",
            get(member_groups::list_groups).post(member_groups::create_group),
        )
        .route("/member-groups/active", get(member_groups::list_active_groups))
        .route(
            "/member-groups/:id",
            put(member_groups::update_group).delete(member_groups::delete_group),
        )
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route(
            "/members/:id",
            put(members::update_member).delete(members::delete_member),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            put(users::update_user).delete(users::delete_user),
        )
}

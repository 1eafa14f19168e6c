//! Authentication handlers

use axum::{extract::State, Json};
use gather_service::dto::{LoginRequest, LoginResponse};
use gather_service::AuthService;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Exchange administrator credentials for a bearer token
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let service = AuthService::new(state.ctx());
    let response = service.login(request).await?;
    Ok(Json(response))
}

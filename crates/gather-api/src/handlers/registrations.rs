//! Registration handlers
//!
//! `POST /registrations` is the public admission endpoint; its rejections
//! carry the sentences the registration form displays verbatim.

use axum::{
    extract::{Query, State},
    Json,
};
use gather_service::dto::{
    AvailableMembersQuery, AvailableMembersResponse, MessageResponse, RegistrationListResponse,
    RegistrationResponse, SubmitRegistrationRequest, UpdateRegistrationStatusRequest,
};
use gather_service::RegistrationService;

use crate::extractors::{AdminUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Register a member for a gathering
///
/// POST /registrations
pub async fn submit_registration(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitRegistrationRequest>,
) -> ApiResult<Json<RegistrationResponse>> {
    let service = RegistrationService::new(state.ctx());
    Ok(Json(service.submit(request).await?))
}

/// Active members of a group not yet registered for a gathering
///
/// GET /registrations/available-members?groupId=&gatheringId=
pub async fn available_members(
    State(state): State<AppState>,
    query: Result<Query<AvailableMembersQuery>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<Json<AvailableMembersResponse>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let service = RegistrationService::new(state.ctx());
    Ok(Json(service.available_members(query).await?))
}

/// GET /registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    _admin: AdminUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<RegistrationListResponse>> {
    let service = RegistrationService::new(state.ctx());
    Ok(Json(service.list(page).await?))
}

/// PUT /registrations/{id}
pub async fn update_registration_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRegistrationStatusRequest>,
) -> ApiResult<Json<RegistrationResponse>> {
    let service = RegistrationService::new(state.ctx());
    Ok(Json(service.update_status(id, request).await?))
}

/// DELETE /registrations/{id}
pub async fn delete_registration(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = RegistrationService::new(state.ctx());
    Ok(Json(service.delete(id).await?))
}

//! Gathering handlers
//!
//! Administrative CRUD plus the two cached public listings.

use axum::{extract::State, Json};
use gather_service::dto::{
    ActiveGatheringsResponse, CreateGatheringRequest, GatheringListResponse, GatheringResponse,
    GatheringsWithRegistrationsResponse, MessageResponse, UpdateGatheringRequest,
};
use gather_service::GatheringService;

use crate::extractors::{AdminUser, IdPath, Pagination, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /gatherings
pub async fn list_gatherings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<GatheringListResponse>> {
    let service = GatheringService::new(state.ctx());
    Ok(Json(service.list(page).await?))
}

/// POST /gatherings
pub async fn create_gathering(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateGatheringRequest>,
) -> ApiResult<Json<GatheringResponse>> {
    let service = GatheringService::new(state.ctx());
    Ok(Json(service.create(request).await?))
}

/// PUT /gatherings/{id}
pub async fn update_gathering(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateGatheringRequest>,
) -> ApiResult<Json<GatheringResponse>> {
    let service = GatheringService::new(state.ctx());
    Ok(Json(service.update(id, request).await?))
}

/// DELETE /gatherings/{id}
pub async fn delete_gathering(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = GatheringService::new(state.ctx());
    Ok(Json(service.delete(id).await?))
}

/// Open gatherings that still have places, with their current count
///
/// GET /gatherings/active
pub async fn list_active_gatherings(
    State(state): State<AppState>,
) -> ApiResult<Json<ActiveGatheringsResponse>> {
    let service = GatheringService::new(state.ctx());
    Ok(Json(service.list_active().await?))
}

/// Open gatherings with everyone registered so far
///
/// GET /gatherings/with-registrations
pub async fn list_gatherings_with_registrations(
    State(state): State<AppState>,
) -> ApiResult<Json<GatheringsWithRegistrationsResponse>> {
    let service = GatheringService::new(state.ctx());
    Ok(Json(service.list_with_registrations().await?))
}

//! Member group handlers

use axum::{extract::State, Json};
use gather_service::dto::{
    ActiveGroupsResponse, CreateMemberGroupRequest, MemberGroupListResponse, MemberGroupResponse,
    MessageResponse, UpdateMemberGroupRequest,
};
use gather_service::MemberGroupService;

use crate::extractors::{AdminUser, IdPath, Pagination, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /member-groups
pub async fn list_groups(
    State(state): State<AppState>,
    _admin: AdminUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<MemberGroupListResponse>> {
    let service = MemberGroupService::new(state.ctx());
    Ok(Json(service.list(page).await?))
}

/// Active groups for the public registration form
///
/// GET /member-groups/active
pub async fn list_active_groups(
    State(state): State<AppState>,
) -> ApiResult<Json<ActiveGroupsResponse>> {
    let service = MemberGroupService::new(state.ctx());
    Ok(Json(service.list_active().await?))
}

/// POST /member-groups
pub async fn create_group(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateMemberGroupRequest>,
) -> ApiResult<Json<MemberGroupResponse>> {
    let service = MemberGroupService::new(state.ctx());
    Ok(Json(service.create(request).await?))
}

/// PUT /member-groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateMemberGroupRequest>,
) -> ApiResult<Json<MemberGroupResponse>> {
    let service = MemberGroupService::new(state.ctx());
    Ok(Json(service.update(id, request).await?))
}

/// Fails with 409 while the group still has members
///
/// DELETE /member-groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = MemberGroupService::new(state.ctx());
    Ok(Json(service.delete(id).await?))
}

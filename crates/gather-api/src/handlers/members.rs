//! Member handlers

use axum::{extract::State, Json};
use gather_service::dto::{
    CreateMemberRequest, MemberListResponse, MemberWithGroupResponse, MessageResponse,
    UpdateMemberRequest,
};
use gather_service::MemberService;

use crate::extractors::{AdminUser, IdPath, Pagination, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /members
pub async fn list_members(
    State(state): State<AppState>,
    _admin: AdminUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<MemberListResponse>> {
    let service = MemberService::new(state.ctx());
    Ok(Json(service.list(page).await?))
}

/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Json<MemberWithGroupResponse>> {
    let service = MemberService::new(state.ctx());
    Ok(Json(service.create(request).await?))
}

/// PUT /members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberWithGroupResponse>> {
    let service = MemberService::new(state.ctx());
    Ok(Json(service.update(id, request).await?))
}

/// DELETE /members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = MemberService::new(state.ctx());
    Ok(Json(service.delete(id).await?))
}

//! Administrator account handlers

use axum::{extract::State, Json};
use gather_service::dto::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserListResponse, UserResponse,
};
use gather_service::{ServiceError, UserService};

use crate::extractors::{AdminUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<UserListResponse>> {
    let service = UserService::new(state.ctx());
    Ok(Json(service.list(page).await?))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.ctx());
    Ok(Json(service.create(request).await?))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.ctx());
    Ok(Json(service.update(id, request).await?))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    if admin.user_id == id {
        return Err(ApiError::Service(ServiceError::conflict(
            "Cannot delete the account you are signed in with",
        )));
    }
    let service = UserService::new(state.ctx());
    Ok(Json(service.delete(id).await?))
}

//! Administrator account service

use gather_common::auth::validate_password_strength;
use gather_core::entities::User;
use gather_core::value_objects::{EntityId, PageRequest};
use gather_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserListResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Administrator account service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> ServiceResult<UserListResponse> {
        let page = self.ctx.user_repo().list(page).await?;

        Ok(UserListResponse {
            users: page.items.iter().map(UserResponse::from).collect(),
            total: page.total,
        })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        validate_password_strength(&request.password)?;

        let email = normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let user = User::new(EntityId::generate(), non_blank(request.name), email);

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "Administrator created");

        Ok(UserResponse::from(user))
    }

    /// Update name and email; a present password is re-hashed
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: EntityId, request: UpdateUserRequest) -> ServiceResult<UserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id.to_string()))?;

        if let Some(email) = request.email.as_deref() {
            let email = normalize_email(email);
            if email != user.email {
                if self.ctx.user_repo().email_exists(&email).await? {
                    return Err(DomainError::EmailAlreadyExists.into());
                }
                user.email = email;
            }
        }
        if request.name.is_some() {
            user.name = non_blank(request.name);
        }
        user.touch();

        self.ctx.user_repo().update(&user).await?;

        if let Some(password) = request.password.as_deref() {
            validate_password_strength(password)?;
            let hash = self.ctx.password_service().hash(password)?;
            self.ctx.user_repo().update_password(id, &hash).await?;
        }

        info!(user_id = %id, "Administrator updated");

        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> ServiceResult<MessageResponse> {
        self.ctx.user_repo().delete(id).await?;

        info!(user_id = %id, "Administrator deleted");

        Ok(MessageResponse::deleted("User"))
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

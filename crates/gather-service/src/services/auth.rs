//! Authentication service
//!
//! Handles administrator login and the startup bootstrap account.

use gather_common::auth::validate_password_strength;
use gather_common::{AdminBootstrapConfig, AppError};
use gather_core::entities::User;
use gather_core::{DomainError, EntityId};
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, LoginResponse, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::normalize_email;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        let token = self.ctx.jwt_service().issue(user.id, &user.email)?;

        info!(user_id = %user.id, "Administrator logged in");

        Ok(LoginResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: UserResponse::from(user),
        })
    }

    /// Create the configured administrator unless the email is already taken.
    ///
    /// Returns whether an account was created.
    #[instrument(skip(self, admin), fields(email = %admin.email))]
    pub async fn ensure_admin(&self, admin: &AdminBootstrapConfig) -> ServiceResult<bool> {
        let email = normalize_email(&admin.email);

        if self.ctx.user_repo().email_exists(&email).await? {
            return Ok(false);
        }

        validate_password_strength(&admin.password)?;
        let hash = self.ctx.password_service().hash(&admin.password)?;
        let user = User::new(EntityId::generate(), admin.name.clone(), email);

        match self.ctx.user_repo().create(&user, &hash).await {
            Ok(()) => {}
            // Another instance bootstrapped the same account first
            Err(DomainError::EmailAlreadyExists) => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        info!(user_id = %user.id, "Bootstrap administrator created");

        Ok(true)
    }
}

//! Authentication extractor
//!
//! Extracts and validates the administrator JWT from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use gather_core::EntityId;

use crate::response::ApiError;
use crate::state::AppState;

/// Administrator authenticated by a bearer token
///
/// The token must decode and its subject must still be an existing account,
/// so deleting a user revokes every token issued to it.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: EntityId,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let state = AppState::from_ref(state);
        let ctx = state.ctx();

        let claims = ctx
            .jwt_service()
            .decode_token(bearer.token())
            .and_then(|claims| claims.user_id().map(|id| (id, claims)));
        let (user_id, claims) = match claims {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected bearer token");
                return Err(ApiError::InvalidAuth);
            }
        };

        if ctx.user_repo().find_by_id(user_id).await?.is_none() {
            tracing::warn!(%user_id, "Token subject no longer exists");
            return Err(ApiError::InvalidAuth);
        }

        Ok(AdminUser {
            user_id,
            email: claims.email,
        })
    }
}

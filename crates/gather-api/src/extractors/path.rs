//! Path parameter extractor
//!
//! Type-safe extraction of entity ids from `/:id` routes.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use gather_core::EntityId;

use crate::response::ApiError;

/// The `:id` segment parsed as an [`EntityId`]
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub EntityId);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        parse_id(&raw).map(IdPath)
    }
}

fn parse_id(raw: &str) -> Result<EntityId, ApiError> {
    EntityId::parse(raw).map_err(|_| ApiError::invalid_path("Invalid id format"))
}

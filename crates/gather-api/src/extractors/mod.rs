//! Axum extractors for request handling
//!
//! Custom extractors for administrator authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AdminUser;
pub use pagination::{Pagination, PaginationParams};
pub use path::IdPath;
pub use validated::ValidatedJson;

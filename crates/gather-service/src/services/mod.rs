//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request and orchestrates repository calls, validation and cache upkeep.

pub mod auth;
pub mod context;
pub mod error;
pub mod gathering;
pub mod member;
pub mod member_group;
pub mod registration;
pub mod user;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use gathering::GatheringService;
pub use member::MemberService;
pub use member_group::MemberGroupService;
pub use registration::RegistrationService;
pub use user::UserService;

use gather_core::EntityId;

/// Parse an identifier carried in a request body or query
pub(crate) fn parse_id(field: &str, raw: &str) -> ServiceResult<EntityId> {
    EntityId::parse(raw).map_err(|_| ServiceError::validation(format!("Invalid {field}")))
}

//! Database models - SQLx-compatible structs for PostgreSQL tables

mod gathering;
mod member;
mod member_group;
mod registration;
mod user;

pub use gathering::{GatheringModel, GatheringWithCountModel};
pub use member::{MemberModel, MemberWithGroupModel};
pub use member_group::MemberGroupModel;
pub use registration::{RegistrationDetailsModel, RegistrationModel};
pub use user::UserModel;

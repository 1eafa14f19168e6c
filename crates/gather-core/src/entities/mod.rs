//! Domain entities - core business objects

mod gathering;
mod member;
mod member_group;
mod registration;
mod user;

pub use gathering::{Gathering, GatheringWithCount, GatheringWithRegistrations};
pub use member::{Member, MemberWithGroup};
pub use member_group::MemberGroup;
pub use registration::{Attendee, Registration, RegistrationDetails, RegistrationStatus};
pub use user::User;

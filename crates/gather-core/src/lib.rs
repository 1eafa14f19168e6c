//! # gather-core
//!
//! Domain layer containing entities, value objects, admission rules, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod admission;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use admission::{AdmissionRequest, AdmissionSnapshot, CapacityPolicy};
pub use entities::{
    Attendee, Gathering, GatheringWithCount, GatheringWithRegistrations, Member, MemberGroup,
    MemberWithGroup, Registration, RegistrationDetails, RegistrationStatus, User,
};
pub use error::DomainError;
pub use traits::{
    CacheKey, GatheringListCache, GatheringRepository, MemberGroupRepository, MemberRepository,
    RegistrationRepository, RepoResult, StoreHealth, UserRepository,
};
pub use value_objects::{EntityId, EntityIdParseError, Page, PageRequest};

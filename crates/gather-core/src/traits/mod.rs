//! Traits (ports) implemented by the infrastructure crates

mod cache;
mod repositories;

pub use cache::{CacheKey, GatheringListCache};
pub use repositories::{
    GatheringRepository, MemberGroupRepository, MemberRepository, RegistrationRepository,
    RepoResult, StoreHealth, UserRepository,
};

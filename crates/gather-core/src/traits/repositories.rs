//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::admission::{AdmissionRequest, CapacityPolicy};
use crate::entities::{
    Gathering, GatheringWithCount, GatheringWithRegistrations, Member, MemberGroup,
    MemberWithGroup, RegistrationDetails, RegistrationStatus, User,
};
use crate::error::DomainError;
use crate::value_objects::{EntityId, Page, PageRequest};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Gathering Repository
// ============================================================================

#[async_trait]
pub trait GatheringRepository: Send + Sync {
    /// Find gathering by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Gathering>>;

    /// List gatherings, newest date first
    async fn list(&self, page: PageRequest) -> RepoResult<Page<Gathering>>;

    /// Active gatherings dated at or after `now`, earliest first, with counts
    async fn list_open_with_counts(
        &self,
        now: DateTime<Utc>,
        policy: CapacityPolicy,
    ) -> RepoResult<Vec<GatheringWithCount>>;

    /// Active gatherings dated at or after `now`, earliest first, with their
    /// registrations in creation order
    async fn list_open_with_registrations(
        &self,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<GatheringWithRegistrations>>;

    /// Create a new gathering
    async fn create(&self, gathering: &Gathering) -> RepoResult<()>;

    /// Update an existing gathering
    async fn update(&self, gathering: &Gathering) -> RepoResult<()>;

    /// Delete a gathering together with its registrations
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Member Group Repository
// ============================================================================

#[async_trait]
pub trait MemberGroupRepository: Send + Sync {
    /// Find group by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<MemberGroup>>;

    /// List groups, most recently created first
    async fn list(&self, page: PageRequest) -> RepoResult<Page<MemberGroup>>;

    /// List active groups ordered by name
    async fn list_active(&self) -> RepoResult<Vec<MemberGroup>>;

    /// Create a new group
    async fn create(&self, group: &MemberGroup) -> RepoResult<()>;

    /// Update an existing group
    async fn update(&self, group: &MemberGroup) -> RepoResult<()>;

    /// Delete a group; fails with `GroupHasMembers` while members reference it
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Member>>;

    /// Find member by ID joined with its group
    async fn find_with_group(&self, id: EntityId) -> RepoResult<Option<MemberWithGroup>>;

    /// List members with their groups, most recently created first
    async fn list(&self, page: PageRequest) -> RepoResult<Page<MemberWithGroup>>;

    /// Create a new member; fails with `MemberGroupNotFound` for an unknown group
    async fn create(&self, member: &Member) -> RepoResult<()>;

    /// Update an existing member
    async fn update(&self, member: &Member) -> RepoResult<()>;

    /// Delete a member together with its registrations
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Registration Repository
// ============================================================================

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Admit a registration.
    ///
    /// Implementations must read the admission snapshot, evaluate it with
    /// [`crate::admission::evaluate`] and insert the row as one atomic unit:
    /// two concurrent calls for the same gathering must never both pass the
    /// capacity check on the last place. A rejection writes nothing.
    async fn admit(
        &self,
        request: &AdmissionRequest,
        policy: CapacityPolicy,
    ) -> RepoResult<RegistrationDetails>;

    /// Find registration by ID with member, group and gathering
    async fn find_details(&self, id: EntityId) -> RepoResult<Option<RegistrationDetails>>;

    /// List registrations, most recently created first
    async fn list(&self, page: PageRequest) -> RepoResult<Page<RegistrationDetails>>;

    /// Set a registration's status
    async fn update_status(&self, id: EntityId, status: RegistrationStatus) -> RepoResult<()>;

    /// Delete a registration
    async fn delete(&self, id: EntityId) -> RepoResult<()>;

    /// Count registration rows for a gathering (all statuses)
    async fn count_for_gathering(&self, gathering_id: EntityId) -> RepoResult<i64>;

    /// Active members of `group_id` without a registration for `gathering_id`,
    /// ordered by name
    async fn available_members(
        &self,
        group_id: EntityId,
        gathering_id: EntityId,
    ) -> RepoResult<Vec<Member>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// List users, most recently created first
    async fn list(&self, page: PageRequest) -> RepoResult<Page<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update name and email
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Delete a user
    async fn delete(&self, id: EntityId) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: EntityId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: EntityId, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Health
// ============================================================================

#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Round-trip to the backing store
    async fn ping(&self) -> RepoResult<()>;
}

//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::EntityId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Gathering not found")]
    GatheringNotFound(EntityId),

    #[error("Member not found")]
    MemberNotFound(EntityId),

    #[error("Member group not found")]
    MemberGroupNotFound(EntityId),

    #[error("Registration not found")]
    RegistrationNotFound(EntityId),

    #[error("User not found")]
    UserNotFound(EntityId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Capacity must be a positive number, got {0}")]
    InvalidCapacity(i32),

    #[error("Invalid registration status: {0}")]
    InvalidStatus(String),

    // =========================================================================
    // Admission Rejections
    // =========================================================================
    #[error("Member is already registered for this gathering")]
    DuplicateRegistration,

    #[error("Gathering is at full capacity")]
    CapacityExceeded,

    #[error("Gathering is not open for registration")]
    GatheringInactive,

    #[error("Member is not active")]
    MemberInactive,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User with this email already exists")]
    EmailAlreadyExists,

    #[error("Member group still has members")]
    GroupHasMembers,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::GatheringNotFound(_) => "UNKNOWN_GATHERING",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::MemberGroupNotFound(_) => "UNKNOWN_MEMBER_GROUP",
            Self::RegistrationNotFound(_) => "UNKNOWN_REGISTRATION",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidCapacity(_) => "INVALID_CAPACITY",
            Self::InvalidStatus(_) => "INVALID_STATUS",

            // Admission
            Self::DuplicateRegistration => "DUPLICATE_REGISTRATION",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::GatheringInactive => "GATHERING_INACTIVE",
            Self::MemberInactive => "MEMBER_INACTIVE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::GroupHasMembers => "GROUP_HAS_MEMBERS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GatheringNotFound(_)
                | Self::MemberNotFound(_)
                | Self::MemberGroupNotFound(_)
                | Self::RegistrationNotFound(_)
                | Self::UserNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidCapacity(_)
                | Self::InvalidStatus(_)
        )
    }

    /// Check if this is an admission rejection
    ///
    /// Rejections are terminal for the call: retrying the same request
    /// without fresh data yields the same answer.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRegistration
                | Self::CapacityExceeded
                | Self::GatheringInactive
                | Self::MemberInactive
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::GroupHasMembers)
    }

    /// Check if this is an infrastructure failure that is safe to retry
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::CacheError(_))
    }
}

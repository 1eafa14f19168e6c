//! Registration admission rules
//!
//! A store adapter gathers an [`AdmissionSnapshot`] while holding whatever
//! lock serializes admissions for the gathering, then calls [`evaluate`].
//! Only when it returns `Ok` may the adapter insert the registration; any
//! rejection leaves the store untouched.

use std::fmt;

use crate::entities::{Gathering, Member, RegistrationStatus};
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Which existing registrations occupy a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapacityPolicy {
    /// Every registration row counts, whatever its status
    #[default]
    AllRegistrations,
    /// Cancelled registrations free their place
    ExcludeCancelled,
}

impl CapacityPolicy {
    /// Whether a registration in `status` occupies a place
    #[inline]
    pub fn counts(self, status: RegistrationStatus) -> bool {
        match self {
            Self::AllRegistrations => true,
            Self::ExcludeCancelled => status != RegistrationStatus::Cancelled,
        }
    }

    /// Whether cancelled rows are counted; used as a SQL bind parameter
    #[inline]
    pub fn counts_cancelled(self) -> bool {
        matches!(self, Self::AllRegistrations)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllRegistrations => "all",
            Self::ExcludeCancelled => "exclude-cancelled",
        }
    }
}

impl fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CapacityPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "all-registrations" => Ok(Self::AllRegistrations),
            "exclude-cancelled" | "exclude_cancelled" => Ok(Self::ExcludeCancelled),
            other => Err(DomainError::ValidationError(format!(
                "unknown capacity policy: {other}"
            ))),
        }
    }
}

/// A candidate registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionRequest {
    pub member_id: EntityId,
    pub gathering_id: EntityId,
}

impl AdmissionRequest {
    pub fn new(member_id: EntityId, gathering_id: EntityId) -> Self {
        Self {
            member_id,
            gathering_id,
        }
    }
}

/// Facts read from the store for one admission decision
#[derive(Debug, Clone)]
pub struct AdmissionSnapshot {
    /// A registration row already exists for the exact (member, gathering) pair
    pub already_registered: bool,
    pub gathering: Option<Gathering>,
    pub member: Option<Member>,
    /// Registrations occupying a place under the active [`CapacityPolicy`]
    pub occupied: i64,
}

/// Decide whether a registration may be admitted.
///
/// Checks run in a fixed order so the reported reason is deterministic:
/// duplicate, unknown gathering, unknown member, inactive gathering,
/// inactive member, capacity.
pub fn evaluate(
    request: &AdmissionRequest,
    snapshot: &AdmissionSnapshot,
) -> Result<(), DomainError> {
    if snapshot.already_registered {
        return Err(DomainError::DuplicateRegistration);
    }

    let gathering = snapshot
        .gathering
        .as_ref()
        .ok_or(DomainError::GatheringNotFound(request.gathering_id))?;

    let member = snapshot
        .member
        .as_ref()
        .ok_or(DomainError::MemberNotFound(request.member_id))?;

    if !gathering.is_active {
        return Err(DomainError::GatheringInactive);
    }

    if !member.is_active {
        return Err(DomainError::MemberInactive);
    }

    if !gathering.has_room(snapshot.occupied) {
        return Err(DomainError::CapacityExceeded);
    }

    Ok(())
}

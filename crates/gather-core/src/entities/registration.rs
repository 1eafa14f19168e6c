//! Registration entity - a member's place in a gathering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::gathering::Gathering;
use super::member::Member;
use super::member_group::MemberGroup;
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Registration status
///
/// New registrations always start as `Registered`. Administrators may move a
/// registration to any status from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Registered,
    Attended,
    Cancelled,
}

impl RegistrationStatus {
    pub const ALL: [Self; 3] = [Self::Registered, Self::Attended, Self::Cancelled];

    /// Storage and wire representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Attended => "attended",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RegistrationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "attended" => Ok(Self::Attended),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// Registration entity (junction between Member and Gathering)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: EntityId,
    pub member_id: EntityId,
    pub gathering_id: EntityId,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Create a new registration in the `Registered` state
    pub fn new(id: EntityId, member_id: EntityId, gathering_id: EntityId) -> Self {
        let now = Utc::now();
        Self {
            id,
            member_id,
            gathering_id,
            status: RegistrationStatus::Registered,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: RegistrationStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Registration joined with its member, the member's group and the gathering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetails {
    pub registration: Registration,
    pub member: Member,
    pub group: MemberGroup,
    pub gathering: Gathering,
}

/// Registration as listed under its gathering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub registration: Registration,
    pub member: Member,
    pub group: MemberGroup,
}

impl From<RegistrationDetails> for Attendee {
    fn from(details: RegistrationDetails) -> Self {
        Self {
            registration: details.registration,
            member: details.member,
            group: details.group,
        }
    }
}

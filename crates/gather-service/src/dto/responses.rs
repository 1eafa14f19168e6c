//! Response DTOs for API endpoints
//!
//! All response DTOs serialize with camelCase field names. The public
//! gathering listings also implement `Deserialize` so they can be served
//! back out of the listing cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain confirmation message, e.g. after a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn deleted(entity: &str) -> Self {
        Self::new(format!("{entity} deleted successfully"))
    }
}

// ============================================================================
// Gathering Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatheringResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub date: DateTime<Utc>,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gathering open for registration with its current count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGatheringResponse {
    #[serde(flatten)]
    pub gathering: GatheringResponse,
    pub registration_count: i64,
}

/// Gathering with every registration it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatheringWithRegistrationsResponse {
    #[serde(flatten)]
    pub gathering: GatheringResponse,
    pub registrations: Vec<AttendeeResponse>,
    pub registration_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatheringListResponse {
    pub gatherings: Vec<GatheringResponse>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveGatheringsResponse {
    pub gatherings: Vec<ActiveGatheringResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatheringsWithRegistrationsResponse {
    pub gatherings: Vec<GatheringWithRegistrationsResponse>,
}

// ============================================================================
// Member Group Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberGroupResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberGroupListResponse {
    pub member_groups: Vec<MemberGroupResponse>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveGroupsResponse {
    pub groups: Vec<MemberGroupResponse>,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub group_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Member with its group nested under `group`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberWithGroupResponse {
    #[serde(flatten)]
    pub member: MemberResponse,
    pub group: MemberGroupResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberWithGroupResponse>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableMembersResponse {
    pub members: Vec<MemberResponse>,
}

// ============================================================================
// Registration Responses
// ============================================================================

/// Registration joined with member (and group) and gathering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: String,
    pub member_id: String,
    pub gathering_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub member: MemberWithGroupResponse,
    pub gathering: GatheringResponse,
}

/// Registration as nested under its gathering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeResponse {
    pub id: String,
    pub member_id: String,
    pub gathering_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub member: MemberWithGroupResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationListResponse {
    pub registrations: Vec<RegistrationResponse>,
    pub total: i64,
}

// ============================================================================
// User & Auth Responses
// ============================================================================

/// Administrator account; never carries the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub database: bool,
    pub cache: bool,
}

impl ReadinessResponse {
    pub fn new(database: bool, cache: bool) -> Self {
        let status = if database && cache { "ready" } else { "not_ready" };
        Self {
            status: status.to_string(),
            checks: HealthChecks { database, cache },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database && self.checks.cache
    }
}

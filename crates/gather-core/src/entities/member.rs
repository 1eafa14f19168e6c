//! Member entity - an individual who may register for gatherings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::member_group::MemberGroup;
use crate::value_objects::EntityId;

/// Member entity, always belonging to exactly one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub group_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new active Member in the given group
    pub fn new(id: EntityId, name: String, email: String, group_id: EntityId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            phone: None,
            address: None,
            is_active: true,
            group_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the member belongs to a group
    #[inline]
    pub fn is_in_group(&self, group_id: EntityId) -> bool {
        self.group_id == group_id
    }

    /// Move the member to another group
    pub fn move_to_group(&mut self, group_id: EntityId) {
        self.group_id = group_id;
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Member joined with its group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberWithGroup {
    pub member: Member,
    pub group: MemberGroup,
}

//! Gathering entity - a scheduled event with a fixed number of places

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::registration::Attendee;
use crate::value_objects::EntityId;

/// Gathering entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gathering {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub date: DateTime<Utc>,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Gathering {
    /// Create a new active Gathering
    pub fn new(
        id: EntityId,
        title: String,
        location: String,
        date: DateTime<Utc>,
        capacity: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: None,
            location,
            date,
            capacity,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the gathering is listed for public registration at `now`
    #[inline]
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.date >= now
    }

    /// Whether another registration fits next to `occupied` counted ones
    #[inline]
    pub fn has_room(&self, occupied: i64) -> bool {
        occupied < i64::from(self.capacity)
    }

    /// Places left, never negative
    pub fn remaining(&self, occupied: i64) -> i64 {
        (i64::from(self.capacity) - occupied).max(0)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Gathering together with its current registration count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatheringWithCount {
    pub gathering: Gathering,
    pub registration_count: i64,
}

impl GatheringWithCount {
    pub fn is_full(&self) -> bool {
        !self.gathering.has_room(self.registration_count)
    }
}

/// Gathering together with every registration it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatheringWithRegistrations {
    pub gathering: Gathering,
    pub registrations: Vec<Attendee>,
}

impl GatheringWithRegistrations {
    pub fn registration_count(&self) -> i64 {
        self.registrations.len() as i64
    }
}

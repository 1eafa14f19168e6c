//! Gathering database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for gatherings table
#[derive(Debug, Clone, FromRow)]
pub struct GatheringModel {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub date: DateTime<Utc>,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gathering row with an aggregated registration count
#[derive(Debug, Clone, FromRow)]
pub struct GatheringWithCountModel {
    #[sqlx(flatten)]
    pub gathering: GatheringModel,
    pub registration_count: i64,
}

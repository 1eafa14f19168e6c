//! Member database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub group_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Member row joined with its group (group columns prefixed `group_`)
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithGroupModel {
    #[sqlx(flatten)]
    pub member: MemberModel,
    pub group_name: String,
    pub group_description: Option<String>,
    pub group_is_active: bool,
    pub group_created_at: DateTime<Utc>,
    pub group_updated_at: DateTime<Utc>,
}

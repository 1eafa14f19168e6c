//! Registration database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for gathering_registrations table
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationModel {
    pub id: Uuid,
    pub member_id: Uuid,
    pub gathering_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration joined with member, member group and gathering
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationDetailsModel {
    #[sqlx(flatten)]
    pub registration: RegistrationModel,

    pub member_name: String,
    pub member_email: String,
    pub member_phone: Option<String>,
    pub member_address: Option<String>,
    pub member_is_active: bool,
    pub member_group_id: Uuid,
    pub member_created_at: DateTime<Utc>,
    pub member_updated_at: DateTime<Utc>,

    pub group_name: String,
    pub group_description: Option<String>,
    pub group_is_active: bool,
    pub group_created_at: DateTime<Utc>,
    pub group_updated_at: DateTime<Utc>,

    pub gathering_title: String,
    pub gathering_description: Option<String>,
    pub gathering_location: String,
    pub gathering_date: DateTime<Utc>,
    pub gathering_capacity: i32,
    pub gathering_is_active: bool,
    pub gathering_created_at: DateTime<Utc>,
    pub gathering_updated_at: DateTime<Utc>,
}

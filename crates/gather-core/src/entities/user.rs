//! User entity - an administrator account

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// Administrator account. The password hash is stored separately and never
/// travels with this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: EntityId,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: EntityId, name: Option<String>, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name to show in the admin UI, falling back to the email
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

//! Subject catalog entry

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(id: Uuid, name: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

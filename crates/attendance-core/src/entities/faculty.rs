//! Faculty profile

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Faculty profile; `faculty_id` is the institution's employee code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub faculty_id: String,
    pub created_at: DateTime<Utc>,
}

impl FacultyProfile {
    pub fn new(id: Uuid, user_id: Uuid, name: String, faculty_id: String) -> Self {
        Self {
            id,
            user_id,
            name,
            faculty_id,
            created_at: Utc::now(),
        }
    }
}

//! Faculty profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for faculty table
#[derive(Debug, Clone, FromRow)]
pub struct FacultyModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub faculty_id: String,
    pub created_at: DateTime<Utc>,
}

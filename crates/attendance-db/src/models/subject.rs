use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for subjects table
#[derive(Debug, Clone, FromRow)]
pub struct SubjectModel {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

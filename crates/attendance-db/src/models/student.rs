//! Student profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for students table
#[derive(Debug, Clone, FromRow)]
pub struct StudentModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub enrollment_number: String,
    pub mobile_number: Option<String>,
    pub semester: i32,
    pub course: String,
    pub class: String,
    pub created_at: DateTime<Utc>,
}

/// Distinct (course, class, semester) triple
#[derive(Debug, Clone, FromRow)]
pub struct PopulationModel {
    pub course: String,
    pub class: String,
    pub semester: i32,
}

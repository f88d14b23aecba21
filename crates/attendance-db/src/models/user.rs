//! User database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One user row left-joined with its student and faculty profile rows
#[derive(Debug, Clone, FromRow)]
pub struct UserWithProfileModel {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub student_profile_id: Option<Uuid>,
    pub student_name: Option<String>,
    pub enrollment_number: Option<String>,
    pub mobile_number: Option<String>,
    pub semester: Option<i32>,
    pub course: Option<String>,
    pub class: Option<String>,
    pub student_created_at: Option<DateTime<Utc>>,

    pub faculty_profile_id: Option<Uuid>,
    pub faculty_name: Option<String>,
    pub faculty_code: Option<String>,
    pub faculty_created_at: Option<DateTime<Utc>>,
}

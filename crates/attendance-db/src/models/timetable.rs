//! Timetable database model

use chrono::{DateTime, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for timetable table
#[derive(Debug, Clone, FromRow)]
pub struct TimetableModel {
    pub id: Uuid,
    pub day: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    pub semester: i32,
    pub course: String,
    pub class: String,
    pub faculty_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! Attendance record database model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for attendance table
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceModel {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    pub class: String,
    pub course: String,
    pub semester: i32,
    pub present_students_id: Vec<Uuid>,
    pub faculty_id: Uuid,
    pub created_at: DateTime<Utc>,
}

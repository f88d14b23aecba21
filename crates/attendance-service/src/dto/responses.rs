//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use attendance_core::aggregation::{MonthlyAttendance, Standing};
use attendance_core::value_objects::{DayOfWeek, Role};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::time_format;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub profile: ProfileResponse,
}

/// The resolved identity of the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// `GET /auth/me`
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub profile: ProfileResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<FacultyResponse>,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    /// Roster identifier
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub enrollment_number: String,
    pub mobile_number: Option<String>,
    pub semester: i32,
    pub course: String,
    pub class: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacultyResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub faculty_id: String,
}

/// Account joined with its profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<FacultyResponse>,
}

// ============================================================================
// Timetable Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationResponse {
    pub class: String,
    pub course: String,
    pub semester: i32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimetableEntryResponse {
    pub id: Uuid,
    pub day: DayOfWeek,
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    pub time_slot: String,
    pub subject: String,
    pub class: String,
    pub course: String,
    pub semester: i32,
    pub faculty_id: Uuid,
}

/// A weekly grid: entries plus the distinct slots forming its rows
#[derive(Debug, Serialize)]
pub struct TimetableResponse {
    /// Absent for a faculty member's own timetable, which spans populations
    pub population: Option<PopulationResponse>,
    pub entries: Vec<TimetableEntryResponse>,
    pub time_slots: Vec<String>,
}

/// Distinct values among student profiles, for filter dropdowns
#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    pub semesters: Vec<i32>,
    pub courses: Vec<String>,
    pub classes: Vec<String>,
    pub groups: Vec<PopulationResponse>,
}

// ============================================================================
// Attendance Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecordResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    pub subject: String,
    pub class: String,
    pub course: String,
    pub semester: i32,
    pub present_student_ids: Vec<Uuid>,
    pub present_count: usize,
    pub faculty_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Report Responses
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TallyResponse {
    pub attended: u32,
    pub total: u32,
    pub percentage: u8,
    pub standing: Standing,
}

/// One lecture in a student's history
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryResponse {
    pub date: NaiveDate,
    pub subject: String,
    pub time_slot: String,
    pub present: bool,
}

#[derive(Debug, Serialize)]
pub struct StudentSummaryResponse {
    pub student: StudentResponse,
    pub overall: TallyResponse,
    /// All twelve months, January first
    pub monthly: Vec<MonthlyAttendance>,
    /// Months in which lectures were held
    pub trend: Vec<MonthlyAttendance>,
    pub history: Vec<HistoryEntryResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassReportRowResponse {
    pub student_id: Uuid,
    pub name: String,
    pub enrollment_number: String,
    pub attended: u32,
    pub total: u32,
    pub percentage: u8,
    pub standing: Standing,
}

#[derive(Debug, Serialize)]
pub struct ClassReportResponse {
    pub population: PopulationResponse,
    pub total_lectures: u32,
    pub students: Vec<ClassReportRowResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageResponse {
    pub label: String,
    pub average: f64,
}

/// Admin dashboard figures
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub class_wise: Vec<AverageResponse>,
    pub semester_wise: Vec<AverageResponse>,
    pub total_students: i64,
    pub total_faculty: i64,
    pub total_records: i64,
}

// ============================================================================
// Subject Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SubjectResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use attendance_core::traits::AttendanceQuery;
use attendance_core::value_objects::{DayOfWeek, Population, Role};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::time_format;

// ============================================================================
// Auth Requests
// ============================================================================

/// Public student self-registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "Enrollment number must be 1-50 characters"))]
    pub enrollment_number: String,

    #[validate(length(max = 20, message = "Mobile number must be at most 20 characters"))]
    pub mobile_number: Option<String>,

    #[validate(range(min = 1, max = 12, message = "Semester must be 1-12"))]
    pub semester: i32,

    #[validate(length(min = 1, max = 50, message = "Course must be 1-50 characters"))]
    pub course: String,

    #[validate(length(min = 1, max = 20, message = "Class must be 1-20 characters"))]
    pub class: String,
}

impl RegisterStudentRequest {
    pub fn population(&self) -> Population {
        Population::new(self.course.trim(), self.class.trim(), self.semester)
    }
}

/// Login; `role` is the portal the user chose
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,

    #[serde(default)]
    pub role: Option<Role>,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Admin-created account of any role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    pub role: Role,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Enrollment number must be 1-50 characters"))]
    pub enrollment_number: Option<String>,

    #[validate(length(max = 20, message = "Mobile number must be at most 20 characters"))]
    pub mobile_number: Option<String>,

    #[validate(range(min = 1, max = 12, message = "Semester must be 1-12"))]
    pub semester: Option<i32>,

    #[validate(length(min = 1, max = 50, message = "Course must be 1-50 characters"))]
    pub course: Option<String>,

    #[validate(length(min = 1, max = 20, message = "Class must be 1-20 characters"))]
    pub class: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Faculty ID must be 1-50 characters"))]
    pub faculty_id: Option<String>,
}

/// Profile fields an admin may change; email and role are fixed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Enrollment number must be 1-50 characters"))]
    pub enrollment_number: Option<String>,

    #[validate(length(max = 20, message = "Mobile number must be at most 20 characters"))]
    pub mobile_number: Option<String>,

    #[validate(range(min = 1, max = 12, message = "Semester must be 1-12"))]
    pub semester: Option<i32>,

    #[validate(length(min = 1, max = 50, message = "Course must be 1-50 characters"))]
    pub course: Option<String>,

    #[validate(length(min = 1, max = 20, message = "Class must be 1-20 characters"))]
    pub class: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Faculty ID must be 1-50 characters"))]
    pub faculty_id: Option<String>,
}

/// `GET /users` filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<Role>,
    pub search: Option<String>,
}

// ============================================================================
// Population Queries
// ============================================================================

/// `?class&course&semester`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PopulationQuery {
    #[validate(length(min = 1, message = "Class is required"))]
    pub class: String,

    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,

    #[validate(range(min = 1, message = "Semester must be positive"))]
    pub semester: i32,
}

impl PopulationQuery {
    pub fn population(&self) -> Population {
        Population::new(self.course.trim(), self.class.trim(), self.semester)
    }
}

/// Optional population, used by admins to pick a timetable to view
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimetableQuery {
    pub class: Option<String>,
    pub course: Option<String>,
    pub semester: Option<i32>,
}

impl TimetableQuery {
    /// `None` unless all three parts are present
    pub fn population(&self) -> Option<Population> {
        match (&self.course, &self.class, self.semester) {
            (Some(course), Some(class), Some(semester)) => {
                Some(Population::new(course.trim(), class.trim(), semester))
            }
            _ => None,
        }
    }
}

/// `?class&course&semester&date`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LecturesQuery {
    #[validate(length(min = 1, message = "Class is required"))]
    pub class: String,

    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,

    #[validate(range(min = 1, message = "Semester must be positive"))]
    pub semester: i32,

    pub date: NaiveDate,
}

impl LecturesQuery {
    pub fn population(&self) -> Population {
        Population::new(self.course.trim(), self.class.trim(), self.semester)
    }
}

/// `?class&course&semester&from&to`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordsQuery {
    #[validate(length(min = 1, message = "Class is required"))]
    pub class: String,

    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,

    #[validate(range(min = 1, message = "Semester must be positive"))]
    pub semester: i32,

    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RecordsQuery {
    pub fn population(&self) -> Population {
        Population::new(self.course.trim(), self.class.trim(), self.semester)
    }

    pub fn to_query(&self) -> AttendanceQuery {
        AttendanceQuery {
            population: self.population(),
            from: self.from,
            to: self.to,
        }
    }
}

// ============================================================================
// Timetable Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTimetableEntryRequest {
    pub day: DayOfWeek,

    #[serde(with = "time_format")]
    pub start_time: NaiveTime,

    #[serde(with = "time_format")]
    pub end_time: NaiveTime,

    #[validate(length(min = 1, max = 100, message = "Subject must be 1-100 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 20, message = "Class must be 1-20 characters"))]
    pub class: String,

    #[validate(length(min = 1, max = 50, message = "Course must be 1-50 characters"))]
    pub course: String,

    #[validate(range(min = 1, max = 12, message = "Semester must be 1-12"))]
    pub semester: i32,

    /// Owner account; admins only, faculty always own what they create
    pub faculty_id: Option<Uuid>,
}

impl CreateTimetableEntryRequest {
    pub fn population(&self) -> Population {
        Population::new(self.course.trim(), self.class.trim(), self.semester)
    }
}

/// Partial update; omitted fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTimetableEntryRequest {
    pub day: Option<DayOfWeek>,

    #[serde(default, with = "time_format::option")]
    pub start_time: Option<NaiveTime>,

    #[serde(default, with = "time_format::option")]
    pub end_time: Option<NaiveTime>,

    #[validate(length(min = 1, max = 100, message = "Subject must be 1-100 characters"))]
    pub subject: Option<String>,

    #[validate(length(min = 1, max = 20, message = "Class must be 1-20 characters"))]
    pub class: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Course must be 1-50 characters"))]
    pub course: Option<String>,

    #[validate(range(min = 1, max = 12, message = "Semester must be 1-12"))]
    pub semester: Option<i32>,
}

// ============================================================================
// Attendance Requests
// ============================================================================

/// Mark one scheduled lecture on a date
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarkAttendanceRequest {
    pub date: NaiveDate,
    pub timetable_entry_id: Uuid,
    #[serde(default)]
    pub present_student_ids: Vec<Uuid>,
}

/// Mark an unscheduled lecture for a population
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuickMarkRequest {
    #[validate(length(min = 1, max = 20, message = "Class must be 1-20 characters"))]
    pub class: String,

    #[validate(length(min = 1, max = 50, message = "Course must be 1-50 characters"))]
    pub course: String,

    #[validate(range(min = 1, max = 12, message = "Semester must be 1-12"))]
    pub semester: i32,

    #[validate(length(min = 1, max = 100, message = "Subject must be 1-100 characters"))]
    pub subject: String,

    /// Defaults to today (UTC)
    pub date: Option<NaiveDate>,

    #[serde(with = "time_format")]
    pub start_time: NaiveTime,

    #[serde(with = "time_format")]
    pub end_time: NaiveTime,

    #[serde(default)]
    pub present_student_ids: Vec<Uuid>,
}

impl QuickMarkRequest {
    pub fn population(&self) -> Population {
        Population::new(self.course.trim(), self.class.trim(), self.semester)
    }
}

// ============================================================================
// Subject Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubjectRequest {
    #[validate(length(min = 1, max = 100, message = "Subject name must be 1-100 characters"))]
    pub name: String,
}

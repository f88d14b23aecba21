//! Test fixtures and data generators
//!
//! Every fixture gets a fresh suffix so tests can share one database.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "TestPass123";

/// Unique across runs, not just within one process
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// A `{class, course, semester}` nobody else uses
#[derive(Debug, Clone)]
pub struct TestPopulation {
    pub class: String,
    pub course: String,
    pub semester: i32,
}

impl TestPopulation {
    pub fn unique() -> Self {
        Self {
            class: format!("C{}", unique_suffix()),
            course: "BCA".to_string(),
            semester: 3,
        }
    }

    pub fn query(&self) -> String {
        format!(
            "class={}&course={}&semester={}",
            self.class, self.course, self.semester
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterStudentRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub enrollment_number: String,
    pub mobile_number: Option<String>,
    pub semester: i32,
    pub course: String,
    pub class: String,
}

impl RegisterStudentRequest {
    pub fn unique(population: &TestPopulation, name: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            name: name.to_string(),
            email: format!("student{suffix}@college.edu"),
            password: TEST_PASSWORD.to_string(),
            enrollment_number: format!("EN{suffix}"),
            mobile_number: None,
            semester: population.semester,
            course: population.course.clone(),
            class: population.class.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub profile: ProfileResponse,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct CreateFacultyRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    pub name: String,
    pub faculty_id: String,
}

impl CreateFacultyRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("faculty{suffix}@college.edu"),
            password: TEST_PASSWORD.to_string(),
            role: "faculty".to_string(),
            name: "Prof. Rao".to_string(),
            faculty_id: format!("FAC{suffix}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateTimetableEntryRequest {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub class: String,
    pub course: String,
    pub semester: i32,
}

impl CreateTimetableEntryRequest {
    /// A 09:00-10:00 lecture on the weekday of `date`
    pub fn on(date: NaiveDate, population: &TestPopulation) -> Self {
        Self {
            day: weekday_name(date).to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            subject: "Data Structures".to_string(),
            class: population.class.clone(),
            course: population.course.clone(),
            semester: population.semester,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkAttendanceRequest {
    pub date: NaiveDate,
    pub timetable_entry_id: String,
    pub present_student_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TallyResponse {
    pub attended: u32,
    pub total: u32,
    pub percentage: u8,
    pub standing: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassReportRow {
    pub name: String,
    pub attended: u32,
    pub total: u32,
    pub percentage: u8,
    pub standing: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassReportResponse {
    pub total_lectures: u32,
    pub students: Vec<ClassReportRow>,
}

#[derive(Debug, Deserialize)]
pub struct StudentSummaryResponse {
    pub overall: TallyResponse,
    pub monthly: Vec<serde_json::Value>,
    pub trend: Vec<serde_json::Value>,
}

/// Monday 2024-03-04
pub fn lecture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap_or_default()
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

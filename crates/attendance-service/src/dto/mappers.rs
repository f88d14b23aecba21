//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use attendance_common::auth::TokenPair;
use attendance_core::aggregation::{AttendanceTally, StudentAttendanceRow};
use attendance_core::entities::{
    AttendanceRecord, ClassSemesterAverage, FacultyProfile, StudentProfile, Subject,
    TimetableEntry, UserWithProfile,
};
use attendance_core::value_objects::Population;

use super::responses::{
    AttendanceRecordResponse, AuthResponse, AverageResponse, ClassReportRowResponse,
    FacultyResponse, PopulationResponse, ProfileResponse, StudentResponse, SubjectResponse,
    TallyResponse, TimetableEntryResponse, UserResponse,
};
use crate::services::Profile;

// ============================================================================
// Auth Mappers
// ============================================================================

impl AuthResponse {
    pub fn new(tokens: TokenPair, profile: &Profile) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            profile: ProfileResponse::from(profile),
        }
    }
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            role: profile.role,
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&StudentProfile> for StudentResponse {
    fn from(student: &StudentProfile) -> Self {
        Self {
            id: student.id,
            user_id: student.user_id,
            name: student.name.clone(),
            enrollment_number: student.enrollment_number.clone(),
            mobile_number: student.mobile_number.clone(),
            semester: student.population.semester,
            course: student.population.course.clone(),
            class: student.population.class.clone(),
        }
    }
}

impl From<&FacultyProfile> for FacultyResponse {
    fn from(faculty: &FacultyProfile) -> Self {
        Self {
            id: faculty.id,
            user_id: faculty.user_id,
            name: faculty.name.clone(),
            faculty_id: faculty.faculty_id.clone(),
        }
    }
}

impl From<&UserWithProfile> for UserResponse {
    fn from(entry: &UserWithProfile) -> Self {
        Self {
            id: entry.user.id,
            email: entry.user.email.clone(),
            role: entry.user.role,
            name: entry.name().map(str::to_string),
            created_at: entry.user.created_at,
            student: entry.student.as_ref().map(StudentResponse::from),
            faculty: entry.faculty.as_ref().map(FacultyResponse::from),
        }
    }
}

// ============================================================================
// Timetable Mappers
// ============================================================================

impl From<&Population> for PopulationResponse {
    fn from(population: &Population) -> Self {
        Self {
            class: population.class.clone(),
            course: population.course.clone(),
            semester: population.semester,
            label: population.label(),
        }
    }
}

impl From<&TimetableEntry> for TimetableEntryResponse {
    fn from(entry: &TimetableEntry) -> Self {
        Self {
            id: entry.id,
            day: entry.day,
            start_time: entry.start_time,
            end_time: entry.end_time,
            time_slot: entry.time_slot(),
            subject: entry.subject.clone(),
            class: entry.population.class.clone(),
            course: entry.population.course.clone(),
            semester: entry.population.semester,
            faculty_id: entry.faculty_id,
        }
    }
}

// ============================================================================
// Attendance Mappers
// ============================================================================

impl From<&AttendanceRecord> for AttendanceRecordResponse {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            start_time: record.start_time,
            end_time: record.end_time,
            subject: record.subject.clone(),
            class: record.population.class.clone(),
            course: record.population.course.clone(),
            semester: record.population.semester,
            present_student_ids: record.present_student_ids.clone(),
            present_count: record.present_student_ids.len(),
            faculty_id: record.faculty_id,
            created_at: record.created_at,
        }
    }
}

// ============================================================================
// Report Mappers
// ============================================================================

impl From<AttendanceTally> for TallyResponse {
    fn from(tally: AttendanceTally) -> Self {
        Self {
            attended: tally.attended,
            total: tally.total,
            percentage: tally.percentage(),
            standing: tally.standing(),
        }
    }
}

impl From<&StudentAttendanceRow> for ClassReportRowResponse {
    fn from(row: &StudentAttendanceRow) -> Self {
        Self {
            student_id: row.student_id,
            name: row.name.clone(),
            enrollment_number: row.enrollment_number.clone(),
            attended: row.tally.attended,
            total: row.tally.total,
            percentage: row.tally.percentage(),
            standing: row.tally.standing(),
        }
    }
}

impl From<&ClassSemesterAverage> for AverageResponse {
    fn from(row: &ClassSemesterAverage) -> Self {
        Self {
            label: row.label.clone(),
            average: row.average,
        }
    }
}

impl From<&Subject> for SubjectResponse {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id,
            name: subject.name.clone(),
            created_at: subject.created_at,
        }
    }
}

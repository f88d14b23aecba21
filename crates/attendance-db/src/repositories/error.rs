//! Error handling utilities for repositories

use attendance_core::error::DomainError;
use sqlx::Error as SqlxError;
use uuid::Uuid;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Uuid) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "student not found" error
pub fn student_not_found(id: Uuid) -> DomainError {
    DomainError::StudentNotFound(id)
}

/// Create a "faculty not found" error
pub fn faculty_not_found(id: Uuid) -> DomainError {
    DomainError::FacultyNotFound(id)
}

/// Create a "timetable entry not found" error
pub fn timetable_entry_not_found(id: Uuid) -> DomainError {
    DomainError::TimetableEntryNotFound(id)
}

/// Create an "attendance record not found" error
pub fn attendance_record_not_found(id: Uuid) -> DomainError {
    DomainError::AttendanceRecordNotFound(id)
}

/// Create a "subject not found" error
pub fn subject_not_found(id: Uuid) -> DomainError {
    DomainError::SubjectNotFound(id)
}

//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Student profile not found for user: {0}")]
    StudentNotFound(Uuid),

    #[error("Faculty profile not found for user: {0}")]
    FacultyNotFound(Uuid),

    #[error("Timetable entry not found: {0}")]
    TimetableEntryNotFound(Uuid),

    #[error("Attendance record not found: {0}")]
    AttendanceRecordNotFound(Uuid),

    #[error("Subject not found: {0}")]
    SubjectNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Lecture must end after it starts")]
    InvalidTimeSlot,

    #[error("Lecture is scheduled on {scheduled}, not on {requested}")]
    LectureNotOnDate { scheduled: String, requested: String },

    #[error("Students not enrolled in this class: {0:?}")]
    StudentsNotInPopulation(Vec<Uuid>),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Role {0} may not perform this action")]
    RoleNotAllowed(String),

    #[error("Account role does not match its profile")]
    RoleMismatch,

    #[error("Not the owner of this timetable entry")]
    NotEntryOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Enrollment number already registered")]
    EnrollmentNumberExists,

    #[error("Faculty ID already registered")]
    FacultyIdExists,

    #[error("Subject already exists")]
    SubjectAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::StudentNotFound(_) => "UNKNOWN_STUDENT",
            Self::FacultyNotFound(_) => "UNKNOWN_FACULTY",
            Self::TimetableEntryNotFound(_) => "UNKNOWN_TIMETABLE_ENTRY",
            Self::AttendanceRecordNotFound(_) => "UNKNOWN_ATTENDANCE_RECORD",
            Self::SubjectNotFound(_) => "UNKNOWN_SUBJECT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidTimeSlot => "INVALID_TIME_SLOT",
            Self::LectureNotOnDate { .. } => "LECTURE_NOT_ON_DATE",
            Self::StudentsNotInPopulation(_) => "STUDENTS_NOT_IN_CLASS",

            // Authorization
            Self::RoleNotAllowed(_) => "ROLE_NOT_ALLOWED",
            Self::RoleMismatch => "ROLE_MISMATCH",
            Self::NotEntryOwner => "NOT_ENTRY_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::EnrollmentNumberExists => "ENROLLMENT_NUMBER_EXISTS",
            Self::FacultyIdExists => "FACULTY_ID_EXISTS",
            Self::SubjectAlreadyExists => "SUBJECT_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::StudentNotFound(_)
                | Self::FacultyNotFound(_)
                | Self::TimetableEntryNotFound(_)
                | Self::AttendanceRecordNotFound(_)
                | Self::SubjectNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::InvalidTimeSlot
                | Self::LectureNotOnDate { .. }
                | Self::StudentsNotInPopulation(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::RoleNotAllowed(_) | Self::RoleMismatch | Self::NotEntryOwner
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::EnrollmentNumberExists
                | Self::FacultyIdExists
                | Self::SubjectAlreadyExists
        )
    }
}

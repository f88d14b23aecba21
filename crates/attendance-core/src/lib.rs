//! # attendance-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! attendance aggregator. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod aggregation;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use aggregation::{
    class_report, monthly_breakdown, percentage, student_tally, AttendanceTally, MonthlyAttendance,
    MonthlyBreakdown, Standing, StudentAttendanceRow, LOW_ATTENDANCE_THRESHOLD,
};
pub use entities::{
    normalize_email, AttendanceRecord, AverageKind, ClassSemesterAverage, FacultyProfile,
    RoleProfile, StudentProfile, Subject, TimetableEntry, User, UserWithProfile,
};
pub use error::DomainError;
pub use traits::{
    AttendanceQuery, AttendanceRepository, FacultyRepository, OverviewRepository, RepoResult,
    StudentRepository, SubjectRepository, TimetableRepository, UserRepository,
};
pub use value_objects::{DayOfWeek, Month, Population, Role, ValueParseError};

//! Domain entities - core business objects

mod attendance;
mod faculty;
mod overview;
mod student;
mod subject;
mod timetable;
mod user;

pub use attendance::{dedup_roster, AttendanceRecord};
pub use faculty::FacultyProfile;
pub use overview::{AverageKind, ClassSemesterAverage};
pub use student::StudentProfile;
pub use subject::Subject;
pub use timetable::{validate_slot, TimetableEntry};
pub use user::{normalize_email, RoleProfile, User, UserWithProfile};

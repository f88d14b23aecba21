//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in attendance-core.
//! Each repository handles database operations for a specific domain entity.

mod attendance;
mod error;
mod faculty;
mod overview;
mod student;
mod subject;
mod timetable;
mod user;

pub use attendance::PgAttendanceRepository;
pub use faculty::PgFacultyRepository;
pub use overview::PgOverviewRepository;
pub use student::PgStudentRepository;
pub use subject::PgSubjectRepository;
pub use timetable::PgTimetableRepository;
pub use user::PgUserRepository;

//! Database models - SQLx-compatible structs for PostgreSQL tables

mod attendance;
mod faculty;
mod overview;
mod student;
mod subject;
mod timetable;
mod user;

pub use attendance::AttendanceModel;
pub use faculty::FacultyModel;
pub use overview::ClassSemesterAverageModel;
pub use student::{PopulationModel, StudentModel};
pub use subject::SubjectModel;
pub use timetable::TimetableModel;
pub use user::{UserModel, UserWithProfileModel};

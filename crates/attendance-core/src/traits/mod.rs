//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AttendanceQuery, AttendanceRepository, FacultyRepository, OverviewRepository, RepoResult,
    StudentRepository, SubjectRepository, TimetableRepository, UserRepository,
};

//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::entities::{
    AttendanceRecord, ClassSemesterAverage, FacultyProfile, RoleProfile, StudentProfile, Subject,
    TimetableEntry, User, UserWithProfile,
};
use crate::error::DomainError;
use crate::value_objects::{DayOfWeek, Population, Role};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;

    /// Create the account row and its role-specific profile atomically
    async fn create_with_profile(
        &self,
        user: &User,
        password_hash: &str,
        profile: &RoleProfile,
    ) -> RepoResult<()>;

    /// Find an account together with its profile rows
    async fn find_with_profile(&self, id: Uuid) -> RepoResult<Option<UserWithProfile>>;

    /// List accounts with their profile rows, optionally restricted to a role
    async fn list_with_profiles(&self, role: Option<Role>) -> RepoResult<Vec<UserWithProfile>>;

    /// Delete an account; profile rows cascade
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// Count accounts holding a role
    async fn count_by_role(&self, role: Role) -> RepoResult<i64>;
}

// ============================================================================
// Student Repository
// ============================================================================

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Find a student profile by its own ID (the roster ID)
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<StudentProfile>>;

    /// Find the student profile of an account
    async fn find_by_user_id(&self, user_id: Uuid) -> RepoResult<Option<StudentProfile>>;

    /// All students of a population, ordered by name
    async fn find_by_population(&self, population: &Population)
        -> RepoResult<Vec<StudentProfile>>;

    /// Distinct populations that have at least one student
    async fn list_populations(&self) -> RepoResult<Vec<Population>>;

    /// Update name, mobile number and population of a profile
    async fn update(&self, student: &StudentProfile) -> RepoResult<()>;
}

// ============================================================================
// Faculty Repository
// ============================================================================

#[async_trait]
pub trait FacultyRepository: Send + Sync {
    /// Find the faculty profile of an account
    async fn find_by_user_id(&self, user_id: Uuid) -> RepoResult<Option<FacultyProfile>>;

    /// Update name and faculty ID of a profile
    async fn update(&self, faculty: &FacultyProfile) -> RepoResult<()>;
}

// ============================================================================
// Timetable Repository
// ============================================================================

#[async_trait]
pub trait TimetableRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<TimetableEntry>>;

    /// Entries owned by a faculty account, ordered by day then start time
    async fn find_by_faculty(&self, faculty_id: Uuid) -> RepoResult<Vec<TimetableEntry>>;

    /// Entries of a population, ordered by start time
    async fn find_by_population(&self, population: &Population)
        -> RepoResult<Vec<TimetableEntry>>;

    /// Entries of a population on one weekday, ordered by start time
    async fn find_for_day(
        &self,
        population: &Population,
        day: DayOfWeek,
    ) -> RepoResult<Vec<TimetableEntry>>;

    async fn create(&self, entry: &TimetableEntry) -> RepoResult<()>;

    async fn update(&self, entry: &TimetableEntry) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Attendance Repository
// ============================================================================

/// Filter for attendance record queries
#[derive(Debug, Clone)]
pub struct AttendanceQuery {
    pub population: Population,
    /// Inclusive lower bound on the lecture date
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the lecture date
    pub to: Option<NaiveDate>,
}

impl AttendanceQuery {
    pub fn population(population: Population) -> Self {
        Self {
            population,
            from: None,
            to: None,
        }
    }
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AttendanceRecord>>;

    /// Records matching the query, ordered by date then start time
    async fn find(&self, query: &AttendanceQuery) -> RepoResult<Vec<AttendanceRecord>>;

    /// Insert one record with its full roster in a single transaction
    async fn create(&self, record: &AttendanceRecord) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// Total number of records
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Subject Repository
// ============================================================================

#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// All subjects ordered by name
    async fn list(&self) -> RepoResult<Vec<Subject>>;

    async fn create(&self, subject: &Subject) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Overview Repository
// ============================================================================

#[async_trait]
pub trait OverviewRepository: Send + Sync {
    /// Rows of the `get_avg_attendance_by_class_semester()` database function
    async fn average_by_class_semester(&self) -> RepoResult<Vec<ClassSemesterAverage>>;
}

//! In-memory repositories and context wiring for service tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use attendance_cache::{RedisPool, RedisPoolConfig};
use attendance_common::auth::JwtService;
use attendance_core::entities::{
    AttendanceRecord, ClassSemesterAverage, FacultyProfile, RoleProfile, StudentProfile, Subject,
    TimetableEntry, User, UserWithProfile,
};
use attendance_core::error::DomainError;
use attendance_core::traits::{
    AttendanceQuery, AttendanceRepository, FacultyRepository, OverviewRepository, RepoResult,
    StudentRepository, SubjectRepository, TimetableRepository, UserRepository,
};
use attendance_core::value_objects::{DayOfWeek, Population, Role};

use crate::services::{ServiceContext, ServiceContextBuilder, SessionContext};

#[derive(Default)]
struct Tables {
    users: Vec<(User, String)>,
    students: Vec<StudentProfile>,
    faculty: Vec<FacultyProfile>,
    timetable: Vec<TimetableEntry>,
    attendance: Vec<AttendanceRecord>,
    subjects: Vec<Subject>,
    averages: Vec<ClassSemesterAverage>,
}

/// One shared in-memory directory implementing every repository trait
#[derive(Default)]
pub struct InMemoryDirectory {
    tables: Mutex<Tables>,
}

impl InMemoryDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut tables = self.tables.lock().unwrap();
        f(&mut tables)
    }

    pub fn add_user(&self, role: Role, profile: Option<RoleProfile>) -> User {
        let id = Uuid::new_v4();
        let user = User::new(id, &format!("{id}@college.edu"), role);
        self.with(|t| {
            t.users.push((user.clone(), "hash".to_string()));
            match profile {
                Some(RoleProfile::Student(mut s)) => {
                    s.user_id = id;
                    t.students.push(s);
                }
                Some(RoleProfile::Faculty(mut f)) => {
                    f.user_id = id;
                    t.faculty.push(f);
                }
                _ => {}
            }
        });
        user
    }

    /// An account whose password verifies against `password`
    pub fn add_account(&self, role: Role, profile: Option<RoleProfile>, password: &str) -> User {
        let user = self.add_user(role, profile);
        let hash = attendance_common::auth::hash_password(password).unwrap();
        self.with(|t| {
            if let Some(slot) = t.users.iter_mut().find(|(u, _)| u.id == user.id) {
                slot.1 = hash;
            }
        });
        user
    }

    pub fn add_student(&self, name: &str, population: &Population) -> StudentProfile {
        let student = StudentProfile::new(
            Uuid::new_v4(),
            Uuid::nil(),
            name.to_string(),
            format!("EN-{name}"),
            None,
            population.clone(),
        );
        let user = self.add_user(Role::Student, Some(RoleProfile::Student(student.clone())));
        StudentProfile {
            user_id: user.id,
            ..student
        }
    }

    pub fn add_faculty(&self, name: &str) -> FacultyProfile {
        let faculty = FacultyProfile::new(
            Uuid::new_v4(),
            Uuid::nil(),
            name.to_string(),
            format!("FAC-{name}"),
        );
        let user = self.add_user(Role::Faculty, Some(RoleProfile::Faculty(faculty.clone())));
        FacultyProfile {
            user_id: user.id,
            ..faculty
        }
    }

    /// Attach a faculty row to an existing account
    pub fn add_faculty_row(&self, faculty: FacultyProfile) {
        self.with(|t| t.faculty.push(faculty));
    }

    pub fn add_entry(&self, entry: TimetableEntry) {
        self.with(|t| t.timetable.push(entry));
    }

    pub fn add_record(&self, record: AttendanceRecord) {
        self.with(|t| t.attendance.push(record));
    }

    pub fn set_averages(&self, averages: Vec<ClassSemesterAverage>) {
        self.with(|t| t.averages = averages);
    }

    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.with(|t| t.attendance.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryDirectory {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone())))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.with(|t| {
            t.users
                .iter()
                .find(|(u, _)| u.email == email)
                .map(|(u, _)| u.clone())
        }))
    }

    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        Ok(self.with(|t| t.users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone())))
    }

    async fn create_with_profile(
        &self,
        user: &User,
        password_hash: &str,
        profile: &RoleProfile,
    ) -> RepoResult<()> {
        self.with(|t| {
            if t.users.iter().any(|(u, _)| u.email == user.email) {
                return Err(DomainError::EmailAlreadyExists);
            }
            match profile {
                RoleProfile::Student(s) => {
                    if t
                        .students
                        .iter()
                        .any(|x| x.enrollment_number == s.enrollment_number)
                    {
                        return Err(DomainError::EnrollmentNumberExists);
                    }
                    t.students.push(s.clone());
                }
                RoleProfile::Faculty(f) => {
                    if t.faculty.iter().any(|x| x.faculty_id == f.faculty_id) {
                        return Err(DomainError::FacultyIdExists);
                    }
                    t.faculty.push(f.clone());
                }
                RoleProfile::Admin => {}
            }
            t.users.push((user.clone(), password_hash.to_string()));
            Ok(())
        })
    }

    async fn find_with_profile(&self, id: Uuid) -> RepoResult<Option<UserWithProfile>> {
        Ok(self.with(|t| {
            t.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| UserWithProfile {
                user: u.clone(),
                student: t.students.iter().find(|s| s.user_id == id).cloned(),
                faculty: t.faculty.iter().find(|f| f.user_id == id).cloned(),
            })
        }))
    }

    async fn list_with_profiles(&self, role: Option<Role>) -> RepoResult<Vec<UserWithProfile>> {
        Ok(self.with(|t| {
            t.users
                .iter()
                .filter(|(u, _)| role.is_none_or(|r| u.role == r))
                .map(|(u, _)| UserWithProfile {
                    user: u.clone(),
                    student: t.students.iter().find(|s| s.user_id == u.id).cloned(),
                    faculty: t.faculty.iter().find(|f| f.user_id == u.id).cloned(),
                })
                .collect()
        }))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.with(|t| {
            let before = t.users.len();
            t.users.retain(|(u, _)| u.id != id);
            if t.users.len() == before {
                return Err(DomainError::UserNotFound(id));
            }
            t.students.retain(|s| s.user_id != id);
            t.faculty.retain(|f| f.user_id != id);
            Ok(())
        })
    }

    async fn count_by_role(&self, role: Role) -> RepoResult<i64> {
        Ok(self.with(|t| t.users.iter().filter(|(u, _)| u.role == role).count() as i64))
    }
}

#[async_trait]
impl StudentRepository for InMemoryDirectory {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<StudentProfile>> {
        Ok(self.with(|t| t.students.iter().find(|s| s.id == id).cloned()))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> RepoResult<Option<StudentProfile>> {
        Ok(self.with(|t| t.students.iter().find(|s| s.user_id == user_id).cloned()))
    }

    async fn find_by_population(
        &self,
        population: &Population,
    ) -> RepoResult<Vec<StudentProfile>> {
        let mut students: Vec<_> = self.with(|t| {
            t.students
                .iter()
                .filter(|s| s.belongs_to(population))
                .cloned()
                .collect()
        });
        students.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(students)
    }

    async fn list_populations(&self) -> RepoResult<Vec<Population>> {
        let mut populations: Vec<_> =
            self.with(|t| t.students.iter().map(|s| s.population.clone()).collect());
        populations.sort();
        populations.dedup();
        Ok(populations)
    }

    async fn update(&self, student: &StudentProfile) -> RepoResult<()> {
        self.with(|t| {
            let slot = t
                .students
                .iter_mut()
                .find(|s| s.id == student.id)
                .ok_or(DomainError::StudentNotFound(student.user_id))?;
            *slot = student.clone();
            Ok(())
        })
    }
}

#[async_trait]
impl FacultyRepository for InMemoryDirectory {
    async fn find_by_user_id(&self, user_id: Uuid) -> RepoResult<Option<FacultyProfile>> {
        Ok(self.with(|t| t.faculty.iter().find(|f| f.user_id == user_id).cloned()))
    }

    async fn update(&self, faculty: &FacultyProfile) -> RepoResult<()> {
        self.with(|t| {
            let slot = t
                .faculty
                .iter_mut()
                .find(|f| f.id == faculty.id)
                .ok_or(DomainError::FacultyNotFound(faculty.user_id))?;
            *slot = faculty.clone();
            Ok(())
        })
    }
}

#[async_trait]
impl TimetableRepository for InMemoryDirectory {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<TimetableEntry>> {
        Ok(self.with(|t| t.timetable.iter().find(|e| e.id == id).cloned()))
    }

    async fn find_by_faculty(&self, faculty_id: Uuid) -> RepoResult<Vec<TimetableEntry>> {
        let mut entries: Vec<_> = self.with(|t| {
            t.timetable
                .iter()
                .filter(|e| e.faculty_id == faculty_id)
                .cloned()
                .collect()
        });
        entries.sort_by_key(|e| (e.day, e.start_time));
        Ok(entries)
    }

    async fn find_by_population(
        &self,
        population: &Population,
    ) -> RepoResult<Vec<TimetableEntry>> {
        let mut entries: Vec<_> = self.with(|t| {
            t.timetable
                .iter()
                .filter(|e| &e.population == population)
                .cloned()
                .collect()
        });
        entries.sort_by_key(|e| (e.day, e.start_time));
        Ok(entries)
    }

    async fn find_for_day(
        &self,
        population: &Population,
        day: DayOfWeek,
    ) -> RepoResult<Vec<TimetableEntry>> {
        let mut entries: Vec<_> = self.with(|t| {
            t.timetable
                .iter()
                .filter(|e| &e.population == population && e.day == day)
                .cloned()
                .collect()
        });
        entries.sort_by_key(|e| e.start_time);
        Ok(entries)
    }

    async fn create(&self, entry: &TimetableEntry) -> RepoResult<()> {
        self.add_entry(entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &TimetableEntry) -> RepoResult<()> {
        self.with(|t| {
            let slot = t
                .timetable
                .iter_mut()
                .find(|e| e.id == entry.id)
                .ok_or(DomainError::TimetableEntryNotFound(entry.id))?;
            *slot = entry.clone();
            Ok(())
        })
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.with(|t| {
            let before = t.timetable.len();
            t.timetable.retain(|e| e.id != id);
            if t.timetable.len() == before {
                return Err(DomainError::TimetableEntryNotFound(id));
            }
            Ok(())
        })
    }
}

fn within(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
}

#[async_trait]
impl AttendanceRepository for InMemoryDirectory {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AttendanceRecord>> {
        Ok(self.with(|t| t.attendance.iter().find(|r| r.id == id).cloned()))
    }

    async fn find(&self, query: &AttendanceQuery) -> RepoResult<Vec<AttendanceRecord>> {
        let mut records: Vec<_> = self.with(|t| {
            t.attendance
                .iter()
                .filter(|r| query.population.matches(r) && within(r.date, query.from, query.to))
                .cloned()
                .collect()
        });
        records.sort_by_key(|r| (r.date, r.start_time));
        Ok(records)
    }

    async fn create(&self, record: &AttendanceRecord) -> RepoResult<()> {
        self.add_record(record.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.with(|t| {
            let before = t.attendance.len();
            t.attendance.retain(|r| r.id != id);
            if t.attendance.len() == before {
                return Err(DomainError::AttendanceRecordNotFound(id));
            }
            Ok(())
        })
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.with(|t| t.attendance.len() as i64))
    }
}

#[async_trait]
impl SubjectRepository for InMemoryDirectory {
    async fn list(&self) -> RepoResult<Vec<Subject>> {
        let mut subjects = self.with(|t| t.subjects.clone());
        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subjects)
    }

    async fn create(&self, subject: &Subject) -> RepoResult<()> {
        self.with(|t| {
            if t.subjects.iter().any(|s| s.name == subject.name) {
                return Err(DomainError::SubjectAlreadyExists);
            }
            t.subjects.push(subject.clone());
            Ok(())
        })
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.with(|t| {
            let before = t.subjects.len();
            t.subjects.retain(|s| s.id != id);
            if t.subjects.len() == before {
                return Err(DomainError::SubjectNotFound(id));
            }
            Ok(())
        })
    }
}

#[async_trait]
impl OverviewRepository for InMemoryDirectory {
    async fn average_by_class_semester(&self) -> RepoResult<Vec<ClassSemesterAverage>> {
        Ok(self.with(|t| t.averages.clone()))
    }
}

/// A context whose repositories are all backed by `directory`.
///
/// The pools are lazy and never connect; call from inside a Tokio runtime.
pub fn test_context(directory: &Arc<InMemoryDirectory>) -> ServiceContext {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    let redis_pool = RedisPool::new(RedisPoolConfig::default()).unwrap();

    ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(redis_pool)
        .user_repo(directory.clone())
        .student_repo(directory.clone())
        .faculty_repo(directory.clone())
        .timetable_repo(directory.clone())
        .attendance_repo(directory.clone())
        .subject_repo(directory.clone())
        .overview_repo(directory.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret", 900, 3600)))
        .build()
        .unwrap()
}

pub fn session_for(user: &User) -> SessionContext {
    SessionContext::new(user.id, user.role, "test-session")
}

pub fn population() -> Population {
    Population::new("BCA", "A", 3)
}

//! Service context - dependency container for services
//!
//! Holds all repositories, the session store and the token service.

use std::sync::Arc;

use attendance_cache::{RedisPool, RefreshTokenStore};
use attendance_common::auth::{JwtService, PasswordPolicy};
use attendance_core::traits::{
    AttendanceRepository, FacultyRepository, OverviewRepository, StudentRepository,
    SubjectRepository, TimetableRepository, UserRepository,
};
use attendance_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloned into every request; services borrow it for the duration of one call.
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: RedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    student_repo: Arc<dyn StudentRepository>,
    faculty_repo: Arc<dyn FacultyRepository>,
    timetable_repo: Arc<dyn TimetableRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,
    subject_repo: Arc<dyn SubjectRepository>,
    overview_repo: Arc<dyn OverviewRepository>,

    // Cache stores
    refresh_token_store: RefreshTokenStore,

    jwt_service: Arc<JwtService>,
    password_policy: PasswordPolicy,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: RedisPool,
        user_repo: Arc<dyn UserRepository>,
        student_repo: Arc<dyn StudentRepository>,
        faculty_repo: Arc<dyn FacultyRepository>,
        timetable_repo: Arc<dyn TimetableRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
        subject_repo: Arc<dyn SubjectRepository>,
        overview_repo: Arc<dyn OverviewRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        let ttl = u64::try_from(jwt_service.refresh_token_expiry()).unwrap_or_default();
        let refresh_token_store = RefreshTokenStore::with_ttl(redis_pool.clone(), ttl);

        Self {
            pool,
            redis_pool,
            user_repo,
            student_repo,
            faculty_repo,
            timetable_repo,
            attendance_repo,
            subject_repo,
            overview_repo,
            refresh_token_store,
            jwt_service,
            password_policy: PasswordPolicy::default(),
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &RedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn student_repo(&self) -> &dyn StudentRepository {
        self.student_repo.as_ref()
    }

    pub fn faculty_repo(&self) -> &dyn FacultyRepository {
        self.faculty_repo.as_ref()
    }

    pub fn timetable_repo(&self) -> &dyn TimetableRepository {
        self.timetable_repo.as_ref()
    }

    pub fn attendance_repo(&self) -> &dyn AttendanceRepository {
        self.attendance_repo.as_ref()
    }

    pub fn subject_repo(&self) -> &dyn SubjectRepository {
        self.subject_repo.as_ref()
    }

    pub fn overview_repo(&self) -> &dyn OverviewRepository {
        self.overview_repo.as_ref()
    }

    // === Cache Stores ===

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    // === Auth ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Strength rules applied to new passwords
    pub fn password_policy(&self) -> &PasswordPolicy {
        &self.password_policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &self.redis_pool)
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    student_repo: Option<Arc<dyn StudentRepository>>,
    faculty_repo: Option<Arc<dyn FacultyRepository>>,
    timetable_repo: Option<Arc<dyn TimetableRepository>>,
    attendance_repo: Option<Arc<dyn AttendanceRepository>>,
    subject_repo: Option<Arc<dyn SubjectRepository>>,
    overview_repo: Option<Arc<dyn OverviewRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn student_repo(mut self, repo: Arc<dyn StudentRepository>) -> Self {
        self.student_repo = Some(repo);
        self
    }

    pub fn faculty_repo(mut self, repo: Arc<dyn FacultyRepository>) -> Self {
        self.faculty_repo = Some(repo);
        self
    }

    pub fn timetable_repo(mut self, repo: Arc<dyn TimetableRepository>) -> Self {
        self.timetable_repo = Some(repo);
        self
    }

    pub fn attendance_repo(mut self, repo: Arc<dyn AttendanceRepository>) -> Self {
        self.attendance_repo = Some(repo);
        self
    }

    pub fn subject_repo(mut self, repo: Arc<dyn SubjectRepository>) -> Self {
        self.subject_repo = Some(repo);
        self
    }

    pub fn overview_repo(mut self, repo: Arc<dyn OverviewRepository>) -> Self {
        self.overview_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool.ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.student_repo.ok_or_else(|| ServiceError::validation("student_repo is required"))?,
            self.faculty_repo.ok_or_else(|| ServiceError::validation("faculty_repo is required"))?,
            self.timetable_repo.ok_or_else(|| ServiceError::validation("timetable_repo is required"))?,
            self.attendance_repo.ok_or_else(|| ServiceError::validation("attendance_repo is required"))?,
            self.subject_repo.ok_or_else(|| ServiceError::validation("subject_repo is required"))?,
            self.overview_repo.ok_or_else(|| ServiceError::validation("overview_repo is required"))?,
            self.jwt_service.ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        ))
    }
}

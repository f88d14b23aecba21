//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use attendance_core::entities::{RoleProfile, User, UserWithProfile};
use attendance_core::error::DomainError;
use attendance_core::traits::{RepoResult, UserRepository};
use attendance_core::value_objects::Role;

use crate::models::{UserModel, UserWithProfileModel};

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_WITH_PROFILE_SELECT: &str = r"
    SELECT u.id, u.email, u.role, u.created_at, u.updated_at,
           s.id AS student_profile_id, s.name AS student_name, s.enrollment_number,
           s.mobile_number, s.semester, s.course, s.class, s.created_at AS student_created_at,
           f.id AS faculty_profile_id, f.name AS faculty_name, f.faculty_id AS faculty_code,
           f.created_at AS faculty_created_at
    FROM users u
    LEFT JOIN students s ON s.user_id = u.id
    LEFT JOIN faculty f ON f.user_id = u.id
";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, role, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, role, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, user, password_hash, profile), fields(user_id = %user.id, role = %user.role))]
    async fn create_with_profile(
        &self,
        user: &User,
        password_hash: &str,
        profile: &RoleProfile,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        match profile {
            RoleProfile::Student(student) => {
                sqlx::query(
                    r"
                    INSERT INTO students (id, user_id, name, enrollment_number, mobile_number,
                                          semester, course, class, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    ",
                )
                .bind(student.id)
                .bind(user.id)
                .bind(&student.name)
                .bind(&student.enrollment_number)
                .bind(&student.mobile_number)
                .bind(student.population.semester)
                .bind(&student.population.course)
                .bind(&student.population.class)
                .bind(student.created_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_unique_violation(e, || DomainError::EnrollmentNumberExists))?;
            }
            RoleProfile::Faculty(faculty) => {
                sqlx::query(
                    r"
                    INSERT INTO faculty (id, user_id, name, faculty_id, created_at)
                    VALUES ($1, $2, $3, $4, $5)
                    ",
                )
                .bind(faculty.id)
                .bind(user.id)
                .bind(&faculty.name)
                .bind(&faculty.faculty_id)
                .bind(faculty.created_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_unique_violation(e, || DomainError::FacultyIdExists))?;
            }
            RoleProfile::Admin => {}
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_with_profile(&self, id: Uuid) -> RepoResult<Option<UserWithProfile>> {
        let sql = format!("{USER_WITH_PROFILE_SELECT} WHERE u.id = $1");
        let result = sqlx::query_as::<_, UserWithProfileModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(UserWithProfile::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_with_profiles(&self, role: Option<Role>) -> RepoResult<Vec<UserWithProfile>> {
        let sql = format!(
            "{USER_WITH_PROFILE_SELECT} WHERE ($1::TEXT IS NULL OR u.role = $1) ORDER BY u.created_at DESC"
        );
        let rows = sqlx::query_as::<_, UserWithProfileModel>(&sql)
            .bind(role.map(Role::as_str))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(UserWithProfile::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_role(&self, role: Role) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM users WHERE role = $1
            ",
        )
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}

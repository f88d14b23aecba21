//! PostgreSQL implementation of FacultyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use attendance_core::entities::FacultyProfile;
use attendance_core::error::DomainError;
use attendance_core::traits::{FacultyRepository, RepoResult};

use crate::models::FacultyModel;

use super::error::{faculty_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of FacultyRepository
#[derive(Clone)]
pub struct PgFacultyRepository {
    pool: PgPool,
}

impl PgFacultyRepository {
    /// Create a new PgFacultyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FacultyRepository for PgFacultyRepository {
    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: Uuid) -> RepoResult<Option<FacultyProfile>> {
        let result = sqlx::query_as::<_, FacultyModel>(
            r"
            SELECT id, user_id, name, faculty_id, created_at
            FROM faculty
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FacultyProfile::from))
    }

    #[instrument(skip(self, faculty), fields(faculty_profile_id = %faculty.id))]
    async fn update(&self, faculty: &FacultyProfile) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE faculty
            SET name = $2, faculty_id = $3
            WHERE id = $1
            ",
        )
        .bind(faculty.id)
        .bind(&faculty.name)
        .bind(&faculty.faculty_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::FacultyIdExists))?;

        if result.rows_affected() == 0 {
            return Err(faculty_not_found(faculty.user_id));
        }

        Ok(())
    }
}

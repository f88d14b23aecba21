//! PostgreSQL implementation of SubjectRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use attendance_core::entities::Subject;
use attendance_core::error::DomainError;
use attendance_core::traits::{RepoResult, SubjectRepository};

use crate::models::SubjectModel;

use super::error::{map_db_error, map_unique_violation, subject_not_found};

/// PostgreSQL implementation of SubjectRepository
#[derive(Clone)]
pub struct PgSubjectRepository {
    pool: PgPool,
}

impl PgSubjectRepository {
    /// Create a new PgSubjectRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRepository for PgSubjectRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Subject>> {
        let rows = sqlx::query_as::<_, SubjectModel>(
            r"
            SELECT id, name, created_at FROM subjects ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Subject::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, subject: &Subject) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO subjects (id, name, created_at) VALUES ($1, $2, $3)
            ",
        )
        .bind(subject.id)
        .bind(&subject.name)
        .bind(subject.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SubjectAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM subjects WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(subject_not_found(id));
        }

        Ok(())
    }
}

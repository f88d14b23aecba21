//! PostgreSQL implementation of AttendanceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use attendance_core::entities::AttendanceRecord;
use attendance_core::traits::{AttendanceQuery, AttendanceRepository, RepoResult};

use crate::models::AttendanceModel;

use super::error::{attendance_record_not_found, map_db_error};

/// PostgreSQL implementation of AttendanceRepository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    /// Create a new PgAttendanceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AttendanceRecord>> {
        let result = sqlx::query_as::<_, AttendanceModel>(
            r"
            SELECT id, date, start_time, end_time, subject, class, course, semester,
                   present_students_id, faculty_id, created_at
            FROM attendance
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AttendanceRecord::from))
    }

    #[instrument(skip(self, query), fields(population = %query.population, from = ?query.from, to = ?query.to))]
    async fn find(&self, query: &AttendanceQuery) -> RepoResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceModel>(
            r"
            SELECT id, date, start_time, end_time, subject, class, course, semester,
                   present_students_id, faculty_id, created_at
            FROM attendance
            WHERE course = $1 AND class = $2 AND semester = $3
              AND ($4::DATE IS NULL OR date >= $4)
              AND ($5::DATE IS NULL OR date <= $5)
            ORDER BY date ASC, start_time ASC
            ",
        )
        .bind(&query.population.course)
        .bind(&query.population.class)
        .bind(query.population.semester)
        .bind(query.from)
        .bind(query.to)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    #[instrument(skip(self, record), fields(record_id = %record.id, present = record.present_student_ids.len()))]
    async fn create(&self, record: &AttendanceRecord) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO attendance (id, date, start_time, end_time, subject, class, course,
                                    semester, present_students_id, faculty_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(record.id)
        .bind(record.date)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(&record.subject)
        .bind(&record.population.class)
        .bind(&record.population.course)
        .bind(record.population.semester)
        .bind(&record.present_student_ids)
        .bind(record.faculty_id)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM attendance WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(attendance_record_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM attendance
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}

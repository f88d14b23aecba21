//! PostgreSQL implementation of TimetableRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use attendance_core::entities::TimetableEntry;
use attendance_core::traits::{RepoResult, TimetableRepository};
use attendance_core::value_objects::{DayOfWeek, Population};

use crate::models::TimetableModel;

use super::error::{map_db_error, timetable_entry_not_found};

/// Weekday order for sorting; the column stores day names
const DAY_ORDER: &str = r"
    CASE day
        WHEN 'Monday' THEN 1 WHEN 'Tuesday' THEN 2 WHEN 'Wednesday' THEN 3
        WHEN 'Thursday' THEN 4 WHEN 'Friday' THEN 5 WHEN 'Saturday' THEN 6
        ELSE 7
    END
";

/// PostgreSQL implementation of TimetableRepository
#[derive(Clone)]
pub struct PgTimetableRepository {
    pool: PgPool,
}

impl PgTimetableRepository {
    /// Create a new PgTimetableRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_entries(rows: Vec<TimetableModel>) -> RepoResult<Vec<TimetableEntry>> {
    rows.into_iter().map(TimetableEntry::try_from).collect()
}

#[async_trait]
impl TimetableRepository for PgTimetableRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<TimetableEntry>> {
        let result = sqlx::query_as::<_, TimetableModel>(
            r"
            SELECT id, day, start_time, end_time, subject, semester, course, class,
                   faculty_id, created_at, updated_at
            FROM timetable
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(TimetableEntry::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_faculty(&self, faculty_id: Uuid) -> RepoResult<Vec<TimetableEntry>> {
        let sql = format!(
            r"
            SELECT id, day, start_time, end_time, subject, semester, course, class,
                   faculty_id, created_at, updated_at
            FROM timetable
            WHERE faculty_id = $1
            ORDER BY {DAY_ORDER}, start_time ASC
            "
        );
        let rows = sqlx::query_as::<_, TimetableModel>(&sql)
            .bind(faculty_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entries(rows)
    }

    #[instrument(skip(self, population), fields(population = %population))]
    async fn find_by_population(
        &self,
        population: &Population,
    ) -> RepoResult<Vec<TimetableEntry>> {
        let sql = format!(
            r"
            SELECT id, day, start_time, end_time, subject, semester, course, class,
                   faculty_id, created_at, updated_at
            FROM timetable
            WHERE course = $1 AND class = $2 AND semester = $3
            ORDER BY {DAY_ORDER}, start_time ASC
            "
        );
        let rows = sqlx::query_as::<_, TimetableModel>(&sql)
            .bind(&population.course)
            .bind(&population.class)
            .bind(population.semester)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entries(rows)
    }

    #[instrument(skip(self, population), fields(population = %population))]
    async fn find_for_day(
        &self,
        population: &Population,
        day: DayOfWeek,
    ) -> RepoResult<Vec<TimetableEntry>> {
        let rows = sqlx::query_as::<_, TimetableModel>(
            r"
            SELECT id, day, start_time, end_time, subject, semester, course, class,
                   faculty_id, created_at, updated_at
            FROM timetable
            WHERE course = $1 AND class = $2 AND semester = $3 AND day = $4
            ORDER BY start_time ASC
            ",
        )
        .bind(&population.course)
        .bind(&population.class)
        .bind(population.semester)
        .bind(day.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entries(rows)
    }

    #[instrument(skip(self, entry), fields(entry_id = %entry.id))]
    async fn create(&self, entry: &TimetableEntry) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO timetable (id, day, start_time, end_time, subject, semester, course, class,
                                   faculty_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(entry.id)
        .bind(entry.day.as_str())
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(&entry.subject)
        .bind(entry.population.semester)
        .bind(&entry.population.course)
        .bind(&entry.population.class)
        .bind(entry.faculty_id)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, entry), fields(entry_id = %entry.id))]
    async fn update(&self, entry: &TimetableEntry) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE timetable
            SET day = $2, start_time = $3, end_time = $4, subject = $5,
                semester = $6, course = $7, class = $8, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(entry.id)
        .bind(entry.day.as_str())
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(&entry.subject)
        .bind(entry.population.semester)
        .bind(&entry.population.course)
        .bind(&entry.population.class)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(timetable_entry_not_found(entry.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM timetable WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(timetable_entry_not_found(id));
        }

        Ok(())
    }
}

//! PostgreSQL implementation of StudentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use attendance_core::entities::StudentProfile;
use attendance_core::error::DomainError;
use attendance_core::traits::{RepoResult, StudentRepository};
use attendance_core::value_objects::Population;

use crate::models::{PopulationModel, StudentModel};

use super::error::{map_db_error, map_unique_violation, student_not_found};

/// PostgreSQL implementation of StudentRepository
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    /// Create a new PgStudentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<StudentProfile>> {
        let result = sqlx::query_as::<_, StudentModel>(
            r"
            SELECT id, user_id, name, enrollment_number, mobile_number,
                   semester, course, class, created_at
            FROM students
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(StudentProfile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: Uuid) -> RepoResult<Option<StudentProfile>> {
        let result = sqlx::query_as::<_, StudentModel>(
            r"
            SELECT id, user_id, name, enrollment_number, mobile_number,
                   semester, course, class, created_at
            FROM students
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(StudentProfile::from))
    }

    #[instrument(skip(self, population), fields(population = %population))]
    async fn find_by_population(
        &self,
        population: &Population,
    ) -> RepoResult<Vec<StudentProfile>> {
        let rows = sqlx::query_as::<_, StudentModel>(
            r"
            SELECT id, user_id, name, enrollment_number, mobile_number,
                   semester, course, class, created_at
            FROM students
            WHERE course = $1 AND class = $2 AND semester = $3
            ORDER BY name ASC, enrollment_number ASC
            ",
        )
        .bind(&population.course)
        .bind(&population.class)
        .bind(population.semester)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(StudentProfile::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_populations(&self) -> RepoResult<Vec<Population>> {
        let rows = sqlx::query_as::<_, PopulationModel>(
            r"
            SELECT DISTINCT course, class, semester
            FROM students
            ORDER BY course, class, semester
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Population::from).collect())
    }

    #[instrument(skip(self, student), fields(student_id = %student.id))]
    async fn update(&self, student: &StudentProfile) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE students
            SET name = $2, enrollment_number = $3, mobile_number = $4,
                semester = $5, course = $6, class = $7
            WHERE id = $1
            ",
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.enrollment_number)
        .bind(&student.mobile_number)
        .bind(student.population.semester)
        .bind(&student.population.course)
        .bind(&student.population.class)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EnrollmentNumberExists))?;

        if result.rows_affected() == 0 {
            return Err(student_not_found(student.user_id));
        }

        Ok(())
    }
}

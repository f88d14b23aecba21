//! PostgreSQL implementation of OverviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use attendance_core::entities::ClassSemesterAverage;
use attendance_core::traits::{OverviewRepository, RepoResult};

use crate::models::ClassSemesterAverageModel;

use super::error::map_db_error;

/// Reads the class/semester averages computed by a database function
#[derive(Clone)]
pub struct PgOverviewRepository {
    pool: PgPool,
}

impl PgOverviewRepository {
    /// Create a new PgOverviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OverviewRepository for PgOverviewRepository {
    #[instrument(skip(self))]
    async fn average_by_class_semester(&self) -> RepoResult<Vec<ClassSemesterAverage>> {
        let rows = sqlx::query_as::<_, ClassSemesterAverageModel>(
            r"
            SELECT type, label, average FROM get_avg_attendance_by_class_semester()
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(ClassSemesterAverage::try_from).collect()
    }
}

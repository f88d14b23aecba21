use sqlx::FromRow;

/// Row returned by `get_avg_attendance_by_class_semester()`
#[derive(Debug, Clone, FromRow)]
pub struct ClassSemesterAverageModel {
    #[sqlx(rename = "type")]
    pub kind: String,
    pub label: String,
    pub average: Option<f64>,
}

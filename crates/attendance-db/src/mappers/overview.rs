use attendance_core::entities::{AverageKind, ClassSemesterAverage};
use attendance_core::error::DomainError;

use crate::models::ClassSemesterAverageModel;

impl TryFrom<ClassSemesterAverageModel> for ClassSemesterAverage {
    type Error = DomainError;

    fn try_from(model: ClassSemesterAverageModel) -> Result<Self, Self::Error> {
        let kind = AverageKind::parse(&model.kind).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown average type: {}", model.kind))
        })?;

        Ok(ClassSemesterAverage {
            kind,
            label: model.label,
            average: model.average.unwrap_or(0.0),
        })
    }
}

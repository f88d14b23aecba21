use attendance_core::entities::TimetableEntry;
use attendance_core::error::DomainError;
use attendance_core::value_objects::{DayOfWeek, Population};

use crate::models::TimetableModel;

use super::corrupt_column;

impl TryFrom<TimetableModel> for TimetableEntry {
    type Error = DomainError;

    fn try_from(model: TimetableModel) -> Result<Self, Self::Error> {
        Ok(TimetableEntry {
            id: model.id,
            day: model.day.parse::<DayOfWeek>().map_err(corrupt_column)?,
            start_time: model.start_time,
            end_time: model.end_time,
            subject: model.subject,
            population: Population::new(model.course, model.class, model.semester),
            faculty_id: model.faculty_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

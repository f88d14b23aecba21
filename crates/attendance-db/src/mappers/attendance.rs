//! Attendance and subject model -> entity mappers

use attendance_core::entities::{dedup_roster, AttendanceRecord, Subject};
use attendance_core::value_objects::Population;

use crate::models::{AttendanceModel, PopulationModel, SubjectModel};

impl From<AttendanceModel> for AttendanceRecord {
    fn from(model: AttendanceModel) -> Self {
        AttendanceRecord {
            id: model.id,
            date: model.date,
            start_time: model.start_time,
            end_time: model.end_time,
            subject: model.subject,
            population: Population::new(model.course, model.class, model.semester),
            present_student_ids: dedup_roster(model.present_students_id),
            faculty_id: model.faculty_id,
            created_at: model.created_at,
        }
    }
}

impl From<SubjectModel> for Subject {
    fn from(model: SubjectModel) -> Self {
        Subject {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

impl From<PopulationModel> for Population {
    fn from(model: PopulationModel) -> Self {
        Population::new(model.course, model.class, model.semester)
    }
}

//! Attendance record - the roster of one lecture occurrence

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use crate::value_objects::{Month, Population};

/// One lecture occurrence. `present_student_ids` is the complete set of
/// attendees; every other student of the population was absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    pub population: Population,
    pub present_student_ids: Vec<Uuid>,
    pub faculty_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Create a record; repeated student ids in the roster are collapsed
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        subject: String,
        population: Population,
        present_student_ids: Vec<Uuid>,
        faculty_id: Uuid,
    ) -> Self {
        Self {
            id,
            date,
            start_time,
            end_time,
            subject,
            population,
            present_student_ids: dedup_roster(present_student_ids),
            faculty_id,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_present(&self, student_id: Uuid) -> bool {
        self.present_student_ids.contains(&student_id)
    }

    #[inline]
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }
}

/// Remove duplicate ids, keeping first-seen order
pub fn dedup_roster(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

//! Per-student rows for one population

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::AttendanceTally;
use crate::entities::{AttendanceRecord, StudentProfile};
use crate::value_objects::Population;

/// One student's line in a class report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentAttendanceRow {
    pub student_id: Uuid,
    pub name: String,
    pub enrollment_number: String,
    pub tally: AttendanceTally,
}

impl StudentAttendanceRow {
    #[inline]
    pub fn percentage(&self) -> u8 {
        self.tally.percentage()
    }
}

/// Tally every student of the population, preserving input order.
/// Students outside the population are skipped.
pub fn class_report(
    population: &Population,
    students: &[StudentProfile],
    records: &[AttendanceRecord],
) -> Vec<StudentAttendanceRow> {
    let mut total = 0u32;
    let mut attended: HashMap<Uuid, u32> = HashMap::new();
    for record in records.iter().filter(|record| population.matches(record)) {
        total += 1;
        let present: HashSet<&Uuid> = record.present_student_ids.iter().collect();
        for id in present {
            *attended.entry(*id).or_default() += 1;
        }
    }

    students
        .iter()
        .filter(|student| student.belongs_to(population))
        .map(|student| StudentAttendanceRow {
            student_id: student.id,
            name: student.name.clone(),
            enrollment_number: student.enrollment_number.clone(),
            tally: AttendanceTally::new(attended.get(&student.id).copied().unwrap_or(0), total),
        })
        .collect()
}

//! Attended/total counters and standing

use serde::Serialize;
use std::iter::Sum;
use std::ops::Add;
use uuid::Uuid;

use super::{percentage, LOW_ATTENDANCE_THRESHOLD};
use crate::entities::AttendanceRecord;
use crate::value_objects::Population;

/// Attended lectures out of the lectures held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AttendanceTally {
    pub attended: u32,
    pub total: u32,
}

impl AttendanceTally {
    pub const fn new(attended: u32, total: u32) -> Self {
        Self { attended, total }
    }

    /// Count one lecture occurrence
    #[inline]
    pub fn record(&mut self, present: bool) {
        self.total += 1;
        if present {
            self.attended += 1;
        }
    }

    #[inline]
    pub fn percentage(&self) -> u8 {
        percentage(self.attended, self.total)
    }

    pub fn standing(&self) -> Standing {
        Standing::from_percentage(self.percentage())
    }
}

impl Add for AttendanceTally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.attended + rhs.attended, self.total + rhs.total)
    }
}

impl Sum for AttendanceTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Whether a percentage meets the attendance threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Good,
    AtRisk,
}

impl Standing {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= LOW_ATTENDANCE_THRESHOLD {
            Self::Good
        } else {
            Self::AtRisk
        }
    }
}

/// Lectures attended by one student out of all lectures held for the population
pub fn student_tally(
    student_id: Uuid,
    population: &Population,
    records: &[AttendanceRecord],
) -> AttendanceTally {
    records
        .iter()
        .filter(|record| population.matches(record))
        .fold(AttendanceTally::default(), |mut tally, record| {
            tally.record(record.is_present(student_id));
            tally
        })
}

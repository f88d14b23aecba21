//! Per-month breakdown over the 12 calendar months

use serde::Serialize;
use uuid::Uuid;

use super::AttendanceTally;
use crate::entities::AttendanceRecord;
use crate::value_objects::{Month, Population};

/// One calendar month of a student's attendance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyAttendance {
    pub month: Month,
    pub attended: u32,
    pub total: u32,
    pub percentage: u8,
}

/// Attendance partitioned by calendar month, year ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlyBreakdown {
    buckets: [AttendanceTally; 12],
}

impl MonthlyBreakdown {
    pub fn get(&self, month: Month) -> AttendanceTally {
        self.buckets[month.index()]
    }

    /// All 12 months in calendar order; months without lectures read 0
    pub fn months(&self) -> impl Iterator<Item = MonthlyAttendance> + '_ {
        Month::ALL.into_iter().map(|month| {
            let tally = self.get(month);
            MonthlyAttendance {
                month,
                attended: tally.attended,
                total: tally.total,
                percentage: tally.percentage(),
            }
        })
    }

    /// Months in which at least one lecture was held
    pub fn trend(&self) -> impl Iterator<Item = MonthlyAttendance> + '_ {
        self.months().filter(|m| m.total > 0)
    }

    /// Sum over all months
    pub fn overall(&self) -> AttendanceTally {
        self.buckets.iter().copied().sum()
    }
}

/// Partition the population's records by month and tally each bucket
pub fn monthly_breakdown(
    student_id: Uuid,
    population: &Population,
    records: &[AttendanceRecord],
) -> MonthlyBreakdown {
    let mut breakdown = MonthlyBreakdown::default();
    for record in records.iter().filter(|record| population.matches(record)) {
        breakdown.buckets[record.month().index()].record(record.is_present(student_id));
    }
    breakdown
}

//! Attendance aggregation
//!
//! Pure functions over already-fetched attendance records. A student's
//! percentage is always measured against the lecture occurrences of their
//! own population: records of other populations contribute neither to the
//! numerator nor to the denominator. Nothing here is persisted; callers
//! recompute on every request.

mod monthly;
mod report;
mod tally;

#[cfg(test)]
mod tests_support;

pub use monthly::{monthly_breakdown, MonthlyAttendance, MonthlyBreakdown};
pub use report::{class_report, StudentAttendanceRow};
pub use tally::{student_tally, AttendanceTally, Standing};

/// Percentages at or above this value are in good standing
pub const LOW_ATTENDANCE_THRESHOLD: u8 = 50;

/// Integer percentage, rounded half up. An empty population yields 0.
pub fn percentage(attended: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let attended = u64::from(attended.min(total));
    let total = u64::from(total);
    // round(100 * a / t) == floor((200 * a + t) / (2 * t))
    ((200 * attended + total) / (2 * total)) as u8
}

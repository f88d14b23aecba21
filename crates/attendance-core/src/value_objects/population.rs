//! Population - the `{class, course, semester}` group used as the denominator
//! for attendance percentages

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::AttendanceRecord;

/// A class/course/semester group of students and their lecture occurrences
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Population {
    pub course: String,
    pub class: String,
    pub semester: i32,
}

impl Population {
    pub fn new(course: impl Into<String>, class: impl Into<String>, semester: i32) -> Self {
        Self {
            course: course.into(),
            class: class.into(),
            semester,
        }
    }

    /// Whether a lecture occurrence was held for this population
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        record.population == *self
    }

    /// Display label, e.g. `BCA-A | Semester 3`
    pub fn label(&self) -> String {
        format!("{}-{} | Semester {}", self.course, self.class, self.semester)
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

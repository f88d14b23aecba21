//! Pre-aggregated attendance averages for the admin overview

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping of an average row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageKind {
    Class,
    Semester,
}

impl AverageKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "class" => Some(Self::Class),
            "semester" => Some(Self::Semester),
            _ => None,
        }
    }
}

impl fmt::Display for AverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => f.write_str("class"),
            Self::Semester => f.write_str("semester"),
        }
    }
}

/// One row of `get_avg_attendance_by_class_semester()`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSemesterAverage {
    pub kind: AverageKind,
    pub label: String,
    pub average: f64,
}

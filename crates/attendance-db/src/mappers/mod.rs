//! Entity to model mappers
//!
//! This module provides conversions between domain entities (attendance-core) and database models.
//! - `From<Model> for Entity`: rows whose columns map one-to-one
//! - `TryFrom<Model> for Entity`: rows carrying role or weekday text that must parse

mod attendance;
mod overview;
mod timetable;
mod user;

use attendance_core::error::DomainError;
use attendance_core::value_objects::ValueParseError;

/// A stored enum column held a value the domain does not know
pub(crate) fn corrupt_column(e: ValueParseError) -> DomainError {
    DomainError::DatabaseError(format!("corrupt column value: {e}"))
}

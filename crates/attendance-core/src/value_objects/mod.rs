//! Value objects - immutable types that represent domain concepts

mod calendar;
mod population;
mod role;

pub use calendar::{DayOfWeek, Month};
pub use population::Population;
pub use role::Role;

/// Error when parsing a value object from its string form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueParseError {
    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid day of week: {0}")]
    InvalidDay(String),
}

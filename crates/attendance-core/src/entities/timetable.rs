//! Timetable entry - one recurring weekly lecture slot

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{DayOfWeek, Population};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableEntry {
    pub id: Uuid,
    pub day: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    pub population: Population,
    /// Account id of the faculty member who owns the slot
    pub faculty_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimetableEntry {
    /// Create a new entry, rejecting slots that end before they start
    pub fn new(
        id: Uuid,
        day: DayOfWeek,
        start_time: NaiveTime,
        end_time: NaiveTime,
        subject: String,
        population: Population,
        faculty_id: Uuid,
    ) -> Result<Self, DomainError> {
        validate_slot(start_time, end_time)?;
        let now = Utc::now();
        Ok(Self {
            id,
            day,
            start_time,
            end_time,
            subject,
            population,
            faculty_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the schedulable fields
    pub fn reschedule(
        &mut self,
        day: DayOfWeek,
        start_time: NaiveTime,
        end_time: NaiveTime,
        subject: String,
        population: Population,
    ) -> Result<(), DomainError> {
        validate_slot(start_time, end_time)?;
        self.day = day;
        self.start_time = start_time;
        self.end_time = end_time;
        self.subject = subject;
        self.population = population;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether this slot takes place on the given date
    #[inline]
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.day == DayOfWeek::of(date)
    }

    /// `HH:MM-HH:MM`
    pub fn time_slot(&self) -> String {
        format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// A lecture slot must end after it starts
pub fn validate_slot(start_time: NaiveTime, end_time: NaiveTime) -> Result<(), DomainError> {
    if end_time <= start_time {
        return Err(DomainError::InvalidTimeSlot);
    }
    Ok(())
}

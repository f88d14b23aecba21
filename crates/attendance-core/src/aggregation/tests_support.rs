//! Record builders shared by the aggregation tests

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::entities::AttendanceRecord;
use crate::value_objects::Population;

pub fn population() -> Population {
    Population::new("BCA", "A", 3)
}

pub fn record_on(year: i32, month: u32, day: u32, present: &[Uuid]) -> AttendanceRecord {
    AttendanceRecord::new(
        Uuid::new_v4(),
        NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        "Operating Systems".to_string(),
        population(),
        present.to_vec(),
        Uuid::new_v4(),
    )
}

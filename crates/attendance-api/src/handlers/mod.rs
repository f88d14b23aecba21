//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod attendance;
pub mod auth;
pub mod health;
pub mod reports;
pub mod subjects;
pub mod timetable;
pub mod users;

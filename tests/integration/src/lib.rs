//! Integration test utilities for the attendance API
//!
//! Spawns the real application against PostgreSQL and Redis and drives it
//! over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

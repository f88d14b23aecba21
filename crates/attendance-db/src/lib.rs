//! # attendance-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `attendance-core`. It handles:
//!
//! - Connection pool management and start-up migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use attendance_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use attendance_db::repositories::PgUserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool, "./migrations").await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_pool, create_pool_from_env, run_migrations, DatabaseConfig, MigrationError, PgPool,
};
pub use repositories::{
    PgAttendanceRepository, PgFacultyRepository, PgOverviewRepository, PgStudentRepository,
    PgSubjectRepository, PgTimetableRepository, PgUserRepository,
};

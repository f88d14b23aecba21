//! Business logic services
//!
//! Every service borrows the shared `ServiceContext` and receives the
//! caller's `SessionContext` explicitly.

pub mod attendance;
pub mod auth;
pub mod context;
pub mod error;
pub mod export;
pub mod identity;
pub mod report;
pub mod session;
pub mod subject;
pub mod timetable;
pub mod user;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use export::{ReportExport, XLSX_CONTENT_TYPE};
pub use identity::{reconcile, IdentityResolver, Profile};
pub use report::ReportService;
pub use session::SessionContext;
pub use subject::SubjectService;
pub use timetable::TimetableService;
pub use user::UserService;

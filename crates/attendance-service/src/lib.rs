//! # attendance-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use dto::*;
pub use services::{
    AttendanceService, AuthService, IdentityResolver, Profile, ReportExport, ReportService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SessionContext,
    SubjectService, TimetableService, UserService, XLSX_CONTENT_TYPE,
};

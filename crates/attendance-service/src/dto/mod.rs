//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;
pub mod time_format;

pub use requests::{
    CreateSubjectRequest, CreateTimetableEntryRequest, CreateUserRequest, LecturesQuery,
    ListUsersQuery, LoginRequest, MarkAttendanceRequest, PopulationQuery, QuickMarkRequest,
    RecordsQuery, RefreshTokenRequest, RegisterStudentRequest, TimetableQuery,
    UpdateTimetableEntryRequest, UpdateUserRequest,
};

pub use responses::{
    AttendanceRecordResponse, AuthResponse, AverageResponse, ClassReportResponse,
    ClassReportRowResponse, FacultyResponse, FilterOptionsResponse, HealthChecks, HealthResponse,
    HistoryEntryResponse, MeResponse, OverviewResponse, PopulationResponse, ProfileResponse,
    ReadinessResponse, StudentResponse, StudentSummaryResponse, SubjectResponse,
    TallyResponse, TimetableEntryResponse, TimetableResponse, UserResponse,
};

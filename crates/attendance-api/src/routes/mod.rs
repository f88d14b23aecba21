//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes sit at the root.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{attendance, auth, health, reports, subjects, timetable, users};
use crate::state::AppState;

/// API router (health routes are separate so they bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(timetable_routes())
        .merge(attendance_routes())
        .merge(report_routes())
        .merge(subject_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:user_id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

fn timetable_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/timetable",
            get(timetable::get_timetable).post(timetable::create_entry),
        )
        .route("/timetable/lectures", get(timetable::lectures_for_date))
        .route("/timetable/filters", get(timetable::filter_options))
        .route(
            "/timetable/:entry_id",
            patch(timetable::update_entry).delete(timetable::delete_entry),
        )
}

fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/attendance",
            get(attendance::list_records).post(attendance::mark_attendance),
        )
        .route("/attendance/quick", post(attendance::quick_mark))
        .route("/attendance/roster", get(attendance::population_roster))
        .route("/attendance/:record_id", delete(attendance::delete_record))
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports/me", get(reports::my_summary))
        .route("/reports/students/:student_id", get(reports::student_summary))
        .route("/reports/groups", get(reports::report_groups))
        .route("/reports/class", get(reports::class_report))
        .route("/reports/class/export", get(reports::export_class_report))
        .route("/reports/overview", get(reports::admin_overview))
}

fn subject_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subjects",
            get(subjects::list_subjects).post(subjects::create_subject),
        )
        .route("/subjects/:subject_id", delete(subjects::delete_subject))
}

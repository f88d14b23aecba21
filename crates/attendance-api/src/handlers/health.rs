//! Health check handlers
//!
//! Liveness and readiness probes.

use attendance_service::{HealthResponse, ReadinessResponse};
use axum::{extract::State, http::StatusCode, Json};

use crate::state::AppState;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check against PostgreSQL and Redis
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = state.service_context().pool().acquire().await.is_ok();

    let redis_healthy = state
        .service_context()
        .redis_pool()
        .health_check()
        .await
        .is_ok();

    let response = ReadinessResponse::ready(db_healthy, redis_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

//! Authentication handlers
//!
//! Student self-registration, login, token refresh, logout and the caller's profile.

use attendance_service::{
    AuthResponse, AuthService, LoginRequest, MeResponse, RefreshTokenRequest,
    RegisterStudentRequest,
};
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a student account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterStudentRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register_student(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email, password and optional portal role
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Rotate the token pair
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}

/// Revoke the caller's session
///
/// POST /auth/logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.logout(&auth.session()).await?;
    Ok(NoContent)
}

/// GET /auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<MeResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.me(&auth.session()).await?;
    Ok(Json(response))
}

//! Authentication extractor
//!
//! Validates the bearer access token and turns its claims into the caller's
//! session context.

use attendance_core::value_objects::Role;
use attendance_service::SessionContext;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from a JWT access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
    pub session_id: String,
}

impl AuthUser {
    pub fn new(user_id: Uuid, role: Role, session_id: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            session_id: session_id.into(),
        }
    }

    /// Explicit session passed into service calls
    pub fn session(&self) -> SessionContext {
        SessionContext::new(self.user_id, self.role, self.session_id.clone())
    }

    /// Reject the request unless the caller holds one of `allowed`
    pub fn require_role(&self, allowed: &[Role]) -> Result<SessionContext, ApiError> {
        let session = self.session();
        session.require_role(allowed)?;
        Ok(session)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::InvalidToken
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::InvalidToken
        })?;

        Ok(AuthUser::new(user_id, claims.role, claims.session_id))
    }
}

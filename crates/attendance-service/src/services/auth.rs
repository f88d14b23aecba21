//! Authentication service
//!
//! Handles student self-registration, login, token refresh, and logout.
//! Every login opens a session whose id is carried in the token claims and
//! keys the stored refresh token.

use attendance_cache::RefreshTokenData;
use attendance_common::auth::{hash_password, verify_password};
use attendance_common::AppError;
use attendance_core::entities::{normalize_email, RoleProfile, StudentProfile, User};
use attendance_core::value_objects::Role;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AuthResponse, FacultyResponse, LoginRequest, MeResponse, ProfileResponse, RefreshTokenRequest,
    RegisterStudentRequest, StudentResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::identity::{reconcile, IdentityResolver, Profile};
use super::session::SessionContext;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a student account and its profile, then sign it in
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register_student(
        &self,
        request: RegisterStudentRequest,
    ) -> ServiceResult<AuthResponse> {
        self.ctx.password_policy().check(&request.password)?;
        let password_hash = hash_password(&request.password)?;

        let user = User::new(Uuid::new_v4(), &request.email, Role::Student);
        let student = StudentProfile::new(
            Uuid::new_v4(),
            user.id,
            request.name.trim().to_string(),
            request.enrollment_number.trim().to_string(),
            non_blank(request.mobile_number.as_deref()),
            request.population(),
        );

        self.ctx
            .user_repo()
            .create_with_profile(&user, &password_hash, &RoleProfile::Student(student))
            .await?;

        info!(user_id = %user.id, "Student registered");

        let profile = Profile {
            id: user.id,
            email: user.email,
            role: Role::Student,
        };
        self.open_session(&profile).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let profile = IdentityResolver::from_context(self.ctx)
            .resolve(user.id, &user.email)
            .await?;
        reconcile(&profile, user.role, request.role)?;

        info!(user_id = %user.id, role = %profile.role, "User logged in");

        self.open_session(&profile).await
    }

    /// Rotate a session's tokens; the presented refresh token stops working
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        // Claiming deletes the session, so a replayed or concurrent refresh
        // with the same token finds nothing.
        let stored = self
            .ctx
            .refresh_token_store()
            .take(&claims.session_id)
            .await?
            .ok_or(ServiceError::App(AppError::SessionRevoked))?;

        if stored.user_id != user_id || !stored.matches(&request.refresh_token) {
            warn!(user_id = %user_id, "Refresh with a rotated-out token");
            return Err(ServiceError::App(AppError::SessionRevoked));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        let profile = IdentityResolver::from_context(self.ctx)
            .resolve(user.id, &user.email)
            .await?;
        reconcile(&profile, user.role, None)?;

        info!(user_id = %user.id, "Tokens refreshed");

        self.open_session(&profile).await
    }

    /// Revoke the caller's session
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn logout(&self, session: &SessionContext) -> ServiceResult<()> {
        self.ctx
            .refresh_token_store()
            .revoke(&session.session_id)
            .await?;

        info!(user_id = %session.user_id, "User logged out");

        Ok(())
    }

    /// The caller's resolved profile with role-specific details
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn me(&self, session: &SessionContext) -> ServiceResult<MeResponse> {
        let entry = self
            .ctx
            .user_repo()
            .find_with_profile(session.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", session.user_id.to_string()))?;

        let profile = IdentityResolver::from_context(self.ctx)
            .resolve_session(session, &entry.user.email)
            .await?;

        Ok(MeResponse {
            profile: ProfileResponse::from(&profile),
            student: entry.student.as_ref().map(StudentResponse::from),
            faculty: entry.faculty.as_ref().map(FacultyResponse::from),
        })
    }

    async fn open_session(&self, profile: &Profile) -> ServiceResult<AuthResponse> {
        let session_id = Uuid::new_v4().to_string();
        let tokens = self
            .ctx
            .jwt_service()
            .issue(profile.id, profile.role, &session_id)?;

        let data = RefreshTokenData::new(profile.id, session_id, tokens.refresh_token.clone());
        self.ctx.refresh_token_store().store(&data).await?;

        Ok(AuthResponse::new(tokens, profile))
    }
}

/// Trimmed value, `None` when empty
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

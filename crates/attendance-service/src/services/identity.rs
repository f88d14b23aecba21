//! Session/identity resolution
//!
//! Maps an authenticated account to its effective role by probing the
//! profile tables: a student profile wins, then a faculty profile, and an
//! account with neither is treated as admin. Login reconciles the result
//! against the role stored on the account row.

use attendance_core::error::DomainError;
use attendance_core::traits::{FacultyRepository, StudentRepository};
use attendance_core::value_objects::Role;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionContext;

/// The resolved identity of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Resolves roles from profile rows
pub struct IdentityResolver<'a> {
    students: &'a dyn StudentRepository,
    faculty: &'a dyn FacultyRepository,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(students: &'a dyn StudentRepository, faculty: &'a dyn FacultyRepository) -> Self {
        Self { students, faculty }
    }

    pub fn from_context(ctx: &'a ServiceContext) -> Self {
        Self::new(ctx.student_repo(), ctx.faculty_repo())
    }

    /// Probe student, then faculty; no profile resolves to admin
    #[instrument(skip(self, email))]
    pub async fn resolve(&self, user_id: Uuid, email: &str) -> ServiceResult<Profile> {
        let role = if self.students.find_by_user_id(user_id).await?.is_some() {
            Role::Student
        } else if self.faculty.find_by_user_id(user_id).await?.is_some() {
            Role::Faculty
        } else {
            Role::Admin
        };

        debug!(role = %role, "Resolved account role");

        Ok(Profile {
            id: user_id,
            email: email.to_string(),
            role,
        })
    }

    /// Resolve the caller of an authenticated request
    pub async fn resolve_session(
        &self,
        session: &SessionContext,
        email: &str,
    ) -> ServiceResult<Profile> {
        self.resolve(session.user_id, email).await
    }
}

/// Check a resolved profile against the stored account role and, when the
/// caller picked a portal, against the requested role.
pub fn reconcile(profile: &Profile, stored: Role, requested: Option<Role>) -> ServiceResult<()> {
    if profile.role != stored {
        warn!(
            user_id = %profile.id,
            stored = %stored,
            resolved = %profile.role,
            "Stored role disagrees with profile rows"
        );
        return Err(ServiceError::Domain(DomainError::RoleMismatch));
    }

    if let Some(requested) = requested {
        if requested != profile.role {
            warn!(
                user_id = %profile.id,
                requested = %requested,
                resolved = %profile.role,
                "Login through the wrong portal"
            );
            return Err(ServiceError::permission_denied(format!(
                "account is not registered as {requested}"
            )));
        }
    }

    Ok(())
}

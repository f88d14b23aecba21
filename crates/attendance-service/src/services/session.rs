//! The authenticated caller, passed explicitly into every service call

use attendance_core::value_objects::Role;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};

/// Identity of the caller as established by a validated access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub role: Role,
    pub session_id: String,
}

impl SessionContext {
    pub fn new(user_id: Uuid, role: Role, session_id: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            session_id: session_id.into(),
        }
    }

    /// Fail unless the caller holds one of `allowed`
    pub fn require_role(&self, allowed: &[Role]) -> ServiceResult<()> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(format!(
                "role {} may not perform this action",
                self.role
            )))
        }
    }

    pub fn require_staff(&self) -> ServiceResult<()> {
        self.require_role(&[Role::Faculty, Role::Admin])
    }

    pub fn require_admin(&self) -> ServiceResult<()> {
        self.require_role(&[Role::Admin])
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

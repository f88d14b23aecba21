//! User management service
//!
//! Admins manage every account; faculty may browse students.

use attendance_common::auth::hash_password;
use attendance_core::entities::{
    FacultyProfile, RoleProfile, StudentProfile, User, UserWithProfile,
};
use attendance_core::value_objects::{Population, Role};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{CreateUserRequest, ListUsersQuery, UpdateUserRequest, UserResponse};

use super::auth::non_blank;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionContext;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an account of any role with its profile (admin only)
    #[instrument(skip(self, session, request), fields(role = %request.role))]
    pub async fn create_user(
        &self,
        session: &SessionContext,
        request: CreateUserRequest,
    ) -> ServiceResult<UserResponse> {
        session.require_admin()?;
        self.ctx.password_policy().check(&request.password)?;

        let user = User::new(Uuid::new_v4(), &request.email, request.role);
        let profile = build_profile(&user, &request)?;
        let password_hash = hash_password(&request.password)?;

        self.ctx
            .user_repo()
            .create_with_profile(&user, &password_hash, &profile)
            .await?;

        info!(user_id = %user.id, created_by = %session.user_id, "User created");

        let (student, faculty) = match profile {
            RoleProfile::Student(s) => (Some(s), None),
            RoleProfile::Faculty(f) => (None, Some(f)),
            RoleProfile::Admin => (None, None),
        };
        Ok(UserResponse::from(&UserWithProfile {
            user,
            student,
            faculty,
        }))
    }

    /// Admins see every account; faculty see students only
    #[instrument(skip(self, session, query))]
    pub async fn list_users(
        &self,
        session: &SessionContext,
        query: ListUsersQuery,
    ) -> ServiceResult<Vec<UserResponse>> {
        let role = match session.role {
            Role::Admin => query.role,
            Role::Faculty => match query.role {
                None | Some(Role::Student) => Some(Role::Student),
                Some(other) => {
                    return Err(ServiceError::permission_denied(format!(
                        "faculty may not list {other} accounts"
                    )))
                }
            },
            Role::Student => {
                return Err(ServiceError::permission_denied("students may not list users"))
            }
        };

        let users = self.ctx.user_repo().list_with_profiles(role).await?;
        let search = query.search.as_deref().unwrap_or_default();

        Ok(users
            .iter()
            .filter(|entry| entry.matches_search(search))
            .map(UserResponse::from)
            .collect())
    }

    /// Get one account with its profile (admin only)
    #[instrument(skip(self, session))]
    pub async fn get_user(
        &self,
        session: &SessionContext,
        user_id: Uuid,
    ) -> ServiceResult<UserResponse> {
        session.require_admin()?;
        let entry = self.find(user_id).await?;
        Ok(UserResponse::from(&entry))
    }

    /// Update the role-specific profile fields (admin only)
    #[instrument(skip(self, session, request))]
    pub async fn update_user(
        &self,
        session: &SessionContext,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        session.require_admin()?;
        let mut entry = self.find(user_id).await?;

        if let Some(student) = entry.student.as_mut() {
            if request.faculty_id.is_some() {
                return Err(ServiceError::validation("students have no faculty ID"));
            }
            apply_student_update(student, &request);
            self.ctx.student_repo().update(student).await?;
        } else if let Some(faculty) = entry.faculty.as_mut() {
            if has_student_fields(&request) {
                return Err(ServiceError::validation(
                    "faculty profiles only have a name and faculty ID",
                ));
            }
            if let Some(name) = non_blank(request.name.as_deref()) {
                faculty.name = name;
            }
            if let Some(code) = non_blank(request.faculty_id.as_deref()) {
                faculty.faculty_id = code;
            }
            self.ctx.faculty_repo().update(faculty).await?;
        } else if has_student_fields(&request) || request.faculty_id.is_some() {
            return Err(ServiceError::validation("admin accounts have no profile"));
        }

        info!(user_id = %user_id, updated_by = %session.user_id, "User updated");

        Ok(UserResponse::from(&entry))
    }

    /// Delete an account and revoke its sessions (admin only)
    #[instrument(skip(self, session))]
    pub async fn delete_user(&self, session: &SessionContext, user_id: Uuid) -> ServiceResult<()> {
        session.require_admin()?;
        if user_id == session.user_id {
            return Err(ServiceError::validation("cannot delete your own account"));
        }

        self.ctx.user_repo().delete(user_id).await?;

        // Stale refresh tokens also fail once the account is gone
        if let Err(e) = self
            .ctx
            .refresh_token_store()
            .revoke_all_for_user(user_id)
            .await
        {
            warn!(user_id = %user_id, error = %e, "Failed to revoke sessions of deleted user");
        }

        info!(user_id = %user_id, deleted_by = %session.user_id, "User deleted");

        Ok(())
    }

    async fn find(&self, user_id: Uuid) -> ServiceResult<UserWithProfile> {
        self.ctx
            .user_repo()
            .find_with_profile(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

fn required(value: Option<&str>, field: &str) -> ServiceResult<String> {
    non_blank(value).ok_or_else(|| ServiceError::validation(format!("{field} is required")))
}

fn build_profile(user: &User, request: &CreateUserRequest) -> ServiceResult<RoleProfile> {
    match request.role {
        Role::Student => {
            let semester = request
                .semester
                .ok_or_else(|| ServiceError::validation("semester is required"))?;
            let population = Population::new(
                required(request.course.as_deref(), "course")?,
                required(request.class.as_deref(), "class")?,
                semester,
            );
            Ok(RoleProfile::Student(StudentProfile::new(
                Uuid::new_v4(),
                user.id,
                required(request.name.as_deref(), "name")?,
                required(request.enrollment_number.as_deref(), "enrollment_number")?,
                non_blank(request.mobile_number.as_deref()),
                population,
            )))
        }
        Role::Faculty => Ok(RoleProfile::Faculty(FacultyProfile::new(
            Uuid::new_v4(),
            user.id,
            required(request.name.as_deref(), "name")?,
            required(request.faculty_id.as_deref(), "faculty_id")?,
        ))),
        Role::Admin => Ok(RoleProfile::Admin),
    }
}

fn has_student_fields(request: &UpdateUserRequest) -> bool {
    request.enrollment_number.is_some()
        || request.mobile_number.is_some()
        || request.semester.is_some()
        || request.course.is_some()
        || request.class.is_some()
}

fn apply_student_update(student: &mut StudentProfile, request: &UpdateUserRequest) {
    if let Some(name) = non_blank(request.name.as_deref()) {
        student.name = name;
    }
    if let Some(enrollment) = non_blank(request.enrollment_number.as_deref()) {
        student.enrollment_number = enrollment;
    }
    // An empty mobile number clears it
    if let Some(mobile) = request.mobile_number.as_deref() {
        student.mobile_number = non_blank(Some(mobile));
    }
    if let Some(semester) = request.semester {
        student.population.semester = semester;
    }
    if let Some(course) = non_blank(request.course.as_deref()) {
        student.population.course = course;
    }
    if let Some(class) = non_blank(request.class.as_deref()) {
        student.population.class = class;
    }
}

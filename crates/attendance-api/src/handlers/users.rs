//! User management handlers
//!
//! Admins manage every account; faculty may list students.

use attendance_core::value_objects::Role;
use attendance_service::{
    CreateUserRequest, ListUsersQuery, UpdateUserRequest, UserResponse, UserService,
};
use axum::{
    extract::{Query, State},
    Json,
};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /users?role&search
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let session = auth.require_role(&[Role::Faculty, Role::Admin])?;
    let service = UserService::new(state.service_context());
    let users = service.list_users(&session, query).await?;
    Ok(Json(users))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let session = auth.require_role(&[Role::Admin])?;
    let service = UserService::new(state.service_context());
    let user = service.create_user(&session, request).await?;
    Ok(Created(Json(user)))
}

/// GET /users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let session = auth.require_role(&[Role::Admin])?;
    let service = UserService::new(state.service_context());
    let user = service.get_user(&session, user_id).await?;
    Ok(Json(user))
}

/// PATCH /users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let session = auth.require_role(&[Role::Admin])?;
    let service = UserService::new(state.service_context());
    let user = service.update_user(&session, user_id, request).await?;
    Ok(Json(user))
}

/// DELETE /users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<NoContent> {
    let session = auth.require_role(&[Role::Admin])?;
    let service = UserService::new(state.service_context());
    service.delete_user(&session, user_id).await?;
    Ok(NoContent)
}

//! Subject catalog handlers

use attendance_core::value_objects::Role;
use attendance_service::{CreateSubjectRequest, SubjectResponse, SubjectService};
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Any authenticated user may read the catalog
///
/// GET /subjects
pub async fn list_subjects(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<SubjectResponse>>> {
    let service = SubjectService::new(state.service_context());
    let subjects = service.list_subjects().await?;
    Ok(Json(subjects))
}

/// POST /subjects
pub async fn create_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateSubjectRequest>,
) -> ApiResult<Created<Json<SubjectResponse>>> {
    let session = auth.require_role(&[Role::Admin])?;
    let service = SubjectService::new(state.service_context());
    let subject = service.create_subject(&session, request).await?;
    Ok(Created(Json(subject)))
}

/// DELETE /subjects/:subject_id
pub async fn delete_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(subject_id): IdPath,
) -> ApiResult<NoContent> {
    let session = auth.require_role(&[Role::Admin])?;
    let service = SubjectService::new(state.service_context());
    service.delete_subject(&session, subject_id).await?;
    Ok(NoContent)
}

//! Attendance marking handlers
//!
//! Marking and roster lookup are open to faculty and admins. Deleting a
//! record is admin only.

use attendance_core::value_objects::Role;
use attendance_service::{
    AttendanceRecordResponse, AttendanceService, MarkAttendanceRequest, PopulationQuery,
    QuickMarkRequest, RecordsQuery, StudentResponse,
};
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, IdPath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

const MARKERS: &[Role] = &[Role::Faculty, Role::Admin];

/// Record one lecture occurrence from a timetable entry
///
/// POST /attendance
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<MarkAttendanceRequest>,
) -> ApiResult<Created<Json<AttendanceRecordResponse>>> {
    let session = auth.require_role(MARKERS)?;
    let service = AttendanceService::new(state.service_context());
    let record = service.mark_attendance(&session, request).await?;
    Ok(Created(Json(record)))
}

/// Record one ad-hoc lecture occurrence
///
/// POST /attendance/quick
pub async fn quick_mark(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<QuickMarkRequest>,
) -> ApiResult<Created<Json<AttendanceRecordResponse>>> {
    let session = auth.require_role(MARKERS)?;
    let service = AttendanceService::new(state.service_context());
    let record = service.quick_mark(&session, request).await?;
    Ok(Created(Json(record)))
}

/// GET /attendance?class&course&semester&from&to
pub async fn list_records(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<RecordsQuery>,
) -> ApiResult<Json<Vec<AttendanceRecordResponse>>> {
    let session = auth.require_role(MARKERS)?;
    let service = AttendanceService::new(state.service_context());
    let records = service.list_records(&session, &query.to_query()).await?;
    Ok(Json(records))
}

/// GET /attendance/roster?class&course&semester
pub async fn population_roster(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<PopulationQuery>,
) -> ApiResult<Json<Vec<StudentResponse>>> {
    let session = auth.require_role(MARKERS)?;
    let service = AttendanceService::new(state.service_context());
    let roster = service
        .population_roster(&session, &query.population())
        .await?;
    Ok(Json(roster))
}

/// DELETE /attendance/:record_id
pub async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(record_id): IdPath,
) -> ApiResult<NoContent> {
    let session = auth.require_role(&[Role::Admin])?;
    let service = AttendanceService::new(state.service_context());
    service.delete_record(&session, record_id).await?;
    Ok(NoContent)
}

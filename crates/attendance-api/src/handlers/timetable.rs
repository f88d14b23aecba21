//! Timetable handlers

use attendance_core::value_objects::Role;
use attendance_service::{
    CreateTimetableEntryRequest, FilterOptionsResponse, LecturesQuery, TimetableEntryResponse,
    TimetableQuery, TimetableResponse, TimetableService, UpdateTimetableEntryRequest,
};
use axum::{
    extract::{Query, State},
    Json,
};

use crate::extractors::{AuthUser, IdPath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Caller's timetable. Faculty see their own entries, students their
/// population's, admins the population named in the query.
///
/// GET /timetable?class&course&semester
pub async fn get_timetable(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TimetableQuery>,
) -> ApiResult<Json<TimetableResponse>> {
    let service = TimetableService::new(state.service_context());
    let timetable = service.timetable_for(&auth.session(), &query).await?;
    Ok(Json(timetable))
}

/// POST /timetable
pub async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTimetableEntryRequest>,
) -> ApiResult<Created<Json<TimetableEntryResponse>>> {
    let session = auth.require_role(&[Role::Faculty, Role::Admin])?;
    let service = TimetableService::new(state.service_context());
    let entry = service.create_entry(&session, request).await?;
    Ok(Created(Json(entry)))
}

/// PATCH /timetable/:entry_id
pub async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(entry_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateTimetableEntryRequest>,
) -> ApiResult<Json<TimetableEntryResponse>> {
    let session = auth.require_role(&[Role::Faculty, Role::Admin])?;
    let service = TimetableService::new(state.service_context());
    let entry = service.update_entry(&session, entry_id, request).await?;
    Ok(Json(entry))
}

/// DELETE /timetable/:entry_id
pub async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(entry_id): IdPath,
) -> ApiResult<NoContent> {
    let session = auth.require_role(&[Role::Faculty, Role::Admin])?;
    let service = TimetableService::new(state.service_context());
    service.delete_entry(&session, entry_id).await?;
    Ok(NoContent)
}

/// Lectures scheduled for a population on a given date
///
/// GET /timetable/lectures?class&course&semester&date
pub async fn lectures_for_date(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<LecturesQuery>,
) -> ApiResult<Json<Vec<TimetableEntryResponse>>> {
    let session = auth.require_role(&[Role::Faculty, Role::Admin])?;
    let service = TimetableService::new(state.service_context());
    let lectures = service
        .lectures_for_date(&session, &query.population(), query.date)
        .await?;
    Ok(Json(lectures))
}

/// GET /timetable/filters
pub async fn filter_options(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FilterOptionsResponse>> {
    let session = auth.require_role(&[Role::Faculty, Role::Admin])?;
    let service = TimetableService::new(state.service_context());
    let options = service.filter_options(&session).await?;
    Ok(Json(options))
}

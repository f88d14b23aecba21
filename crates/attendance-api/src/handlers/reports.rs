//! Attendance report handlers

use attendance_core::value_objects::Role;
use attendance_service::{
    ClassReportResponse, OverviewResponse, PopulationQuery, PopulationResponse, ReportService,
    StudentSummaryResponse,
};
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, IdPath, ValidatedQuery};
use crate::response::{ApiResult, XlsxDownload};
use crate::state::AppState;

/// The calling student's own summary
///
/// GET /reports/me
pub async fn my_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<StudentSummaryResponse>> {
    let session = auth.require_role(&[Role::Student])?;
    let service = ReportService::new(state.service_context());
    let summary = service.my_summary(&session).await?;
    Ok(Json(summary))
}

/// Summary for one roster id. Students may only read their own.
///
/// GET /reports/students/:student_id
pub async fn student_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(student_id): IdPath,
) -> ApiResult<Json<StudentSummaryResponse>> {
    let service = ReportService::new(state.service_context());
    let summary = service.student_summary(&auth.session(), student_id).await?;
    Ok(Json(summary))
}

/// GET /reports/groups
pub async fn report_groups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PopulationResponse>>> {
    let session = auth.require_role(&[Role::Faculty, Role::Admin])?;
    let service = ReportService::new(state.service_context());
    let groups = service.report_groups(&session).await?;
    Ok(Json(groups))
}

/// GET /reports/class?class&course&semester
pub async fn class_report(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<PopulationQuery>,
) -> ApiResult<Json<ClassReportResponse>> {
    let session = auth.require_role(&[Role::Faculty, Role::Admin])?;
    let service = ReportService::new(state.service_context());
    let report = service.class_report(&session, &query.population()).await?;
    Ok(Json(report))
}

/// Class report as an `.xlsx` attachment
///
/// GET /reports/class/export?class&course&semester
pub async fn export_class_report(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<PopulationQuery>,
) -> ApiResult<XlsxDownload> {
    let session = auth.require_role(&[Role::Faculty, Role::Admin])?;
    let service = ReportService::new(state.service_context());
    let export = service
        .export_class_report(&session, &query.population())
        .await?;
    Ok(XlsxDownload(export))
}

/// GET /reports/overview
pub async fn admin_overview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<OverviewResponse>> {
    let session = auth.require_role(&[Role::Admin])?;
    let service = ReportService::new(state.service_context());
    let overview = service.admin_overview(&session).await?;
    Ok(Json(overview))
}

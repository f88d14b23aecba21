//! Report service
//!
//! Fetches raw records per request and runs them through the aggregator.

use attendance_core::aggregation::{class_report, monthly_breakdown, StudentAttendanceRow};
use attendance_core::entities::{AverageKind, StudentProfile};
use attendance_core::error::DomainError;
use attendance_core::traits::AttendanceQuery;
use attendance_core::value_objects::{Population, Role};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::dto::{
    AverageResponse, ClassReportResponse, ClassReportRowResponse, HistoryEntryResponse,
    OverviewResponse, PopulationResponse, StudentResponse, StudentSummaryResponse, TallyResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::export::{self, ReportExport};
use super::session::SessionContext;

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Summary of the calling student
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn my_summary(&self, session: &SessionContext) -> ServiceResult<StudentSummaryResponse> {
        session.require_role(&[Role::Student])?;
        let student = self
            .ctx
            .student_repo()
            .find_by_user_id(session.user_id)
            .await?
            .ok_or(DomainError::StudentNotFound(session.user_id))?;

        self.summarize(&student).await
    }

    /// Summary of one student by roster id; students may only read their own
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn student_summary(
        &self,
        session: &SessionContext,
        student_id: Uuid,
    ) -> ServiceResult<StudentSummaryResponse> {
        let student = self
            .ctx
            .student_repo()
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", student_id.to_string()))?;

        if session.role == Role::Student && student.user_id != session.user_id {
            return Err(ServiceError::permission_denied(
                "students may only view their own attendance",
            ));
        }

        self.summarize(&student).await
    }

    /// Per-student rows for a population
    #[instrument(skip(self, session, population), fields(population = %population))]
    pub async fn class_report(
        &self,
        session: &SessionContext,
        population: &Population,
    ) -> ServiceResult<ClassReportResponse> {
        session.require_staff()?;
        let (rows, total_lectures) = self.class_rows(population).await?;

        Ok(ClassReportResponse {
            population: PopulationResponse::from(population),
            total_lectures,
            students: rows.iter().map(ClassReportRowResponse::from).collect(),
        })
    }

    /// Populations that have students
    #[instrument(skip(self, session))]
    pub async fn report_groups(
        &self,
        session: &SessionContext,
    ) -> ServiceResult<Vec<PopulationResponse>> {
        session.require_staff()?;
        let populations = self.ctx.student_repo().list_populations().await?;
        Ok(populations.iter().map(PopulationResponse::from).collect())
    }

    /// The class report as an xlsx workbook
    #[instrument(skip(self, session, population), fields(population = %population))]
    pub async fn export_class_report(
        &self,
        session: &SessionContext,
        population: &Population,
    ) -> ServiceResult<ReportExport> {
        session.require_staff()?;
        let (rows, _) = self.class_rows(population).await?;
        export::export_class_report(population, &rows)
    }

    /// Class-wise and semester-wise averages plus directory counts (admin only)
    #[instrument(skip(self, session))]
    pub async fn admin_overview(&self, session: &SessionContext) -> ServiceResult<OverviewResponse> {
        session.require_admin()?;

        let averages = self.ctx.overview_repo().average_by_class_semester().await?;
        let (class_wise, semester_wise): (Vec<_>, Vec<_>) = averages
            .iter()
            .partition(|row| row.kind == AverageKind::Class);

        Ok(OverviewResponse {
            class_wise: class_wise.into_iter().map(AverageResponse::from).collect(),
            semester_wise: semester_wise.into_iter().map(AverageResponse::from).collect(),
            total_students: self.ctx.user_repo().count_by_role(Role::Student).await?,
            total_faculty: self.ctx.user_repo().count_by_role(Role::Faculty).await?,
            total_records: self.ctx.attendance_repo().count().await?,
        })
    }

    async fn summarize(&self, student: &StudentProfile) -> ServiceResult<StudentSummaryResponse> {
        let population = &student.population;
        let records = self
            .ctx
            .attendance_repo()
            .find(&AttendanceQuery::population(population.clone()))
            .await?;

        let breakdown = monthly_breakdown(student.id, population, &records);

        debug!(student_id = %student.id, lectures = records.len(), "Computed student summary");

        Ok(StudentSummaryResponse {
            student: StudentResponse::from(student),
            overall: TallyResponse::from(breakdown.overall()),
            monthly: breakdown.months().collect(),
            trend: breakdown.trend().collect(),
            history: records
                .iter()
                .rev()
                .filter(|record| population.matches(record))
                .map(|record| HistoryEntryResponse {
                    date: record.date,
                    subject: record.subject.clone(),
                    time_slot: format!(
                        "{}-{}",
                        record.start_time.format("%H:%M"),
                        record.end_time.format("%H:%M")
                    ),
                    present: record.is_present(student.id),
                })
                .collect(),
        })
    }

    async fn class_rows(
        &self,
        population: &Population,
    ) -> ServiceResult<(Vec<StudentAttendanceRow>, u32)> {
        let students = self.ctx.student_repo().find_by_population(population).await?;
        let records = self
            .ctx
            .attendance_repo()
            .find(&AttendanceQuery::population(population.clone()))
            .await?;

        let total = records.iter().filter(|r| population.matches(r)).count();
        let rows = class_report(population, &students, &records);

        Ok((rows, u32::try_from(total).unwrap_or(u32::MAX)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{population, session_for, test_context, InMemoryDirectory};
    use attendance_core::aggregation::Standing;
    use attendance_core::entities::{AttendanceRecord, ClassSemesterAverage};
    use attendance_core::value_objects::Month;
    use chrono::{NaiveDate, NaiveTime};

    fn record(
        population: &Population,
        (y, m, d): (i32, u32, u32),
        present: &[Uuid],
    ) -> AttendanceRecord {
        AttendanceRecord::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            "Maths".to_string(),
            population.clone(),
            present.to_vec(),
            Uuid::nil(),
        )
    }

    #[tokio::test]
    async fn test_student_summary_by_month() {
        let dir = InMemoryDirectory::new();
        let riya = dir.add_student("Riya", &population());
        for (date, present) in [
            ((2024, 1, 8), true),
            ((2024, 1, 15), false),
            ((2024, 3, 4), true),
            ((2024, 3, 11), true),
            ((2024, 3, 18), true),
        ] {
            let ids = if present { vec![riya.id] } else { vec![] };
            dir.add_record(record(&population(), date, &ids));
        }
        // Another class's lecture never counts
        dir.add_record(record(&Population::new("MCA", "A", 1), (2024, 3, 5), &[riya.id]));
        let ctx = test_context(&dir);

        let summary = ReportService::new(&ctx)
            .my_summary(&SessionContext::new(riya.user_id, Role::Student, "s"))
            .await
            .unwrap();

        assert_eq!(summary.overall.attended, 4);
        assert_eq!(summary.overall.total, 5);
        assert_eq!(summary.overall.percentage, 80);
        assert_eq!(summary.monthly.len(), 12);
        assert_eq!(summary.monthly[0].percentage, 50);
        assert_eq!(summary.monthly[2].percentage, 100);
        assert_eq!(summary.monthly[1].percentage, 0);
        let trend: Vec<Month> = summary.trend.iter().map(|m| m.month).collect();
        assert_eq!(trend, vec![Month::January, Month::March]);
        assert_eq!(summary.history.len(), 5);
        assert_eq!(summary.history[0].date, NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
        assert!(!summary.history[3].present);
    }

    #[tokio::test]
    async fn test_no_records_reads_zero() {
        let dir = InMemoryDirectory::new();
        let riya = dir.add_student("Riya", &population());
        let ctx = test_context(&dir);

        let summary = ReportService::new(&ctx)
            .my_summary(&SessionContext::new(riya.user_id, Role::Student, "s"))
            .await
            .unwrap();

        assert_eq!(summary.overall.percentage, 0);
        assert_eq!(summary.overall.standing, Standing::AtRisk);
        assert!(summary.trend.is_empty());
    }

    #[tokio::test]
    async fn test_students_read_only_their_own_summary() {
        let dir = InMemoryDirectory::new();
        let riya = dir.add_student("Riya", &population());
        let kabir = dir.add_student("Kabir", &population());
        let faculty = dir.add_faculty("Rao");
        let ctx = test_context(&dir);
        let service = ReportService::new(&ctx);
        let riya_session = SessionContext::new(riya.user_id, Role::Student, "s");

        assert!(service.student_summary(&riya_session, riya.id).await.is_ok());

        let err = service
            .student_summary(&riya_session, kabir.id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let faculty_session = SessionContext::new(faculty.user_id, Role::Faculty, "s");
        assert!(service.student_summary(&faculty_session, kabir.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_class_report_rows() {
        let dir = InMemoryDirectory::new();
        let aman = dir.add_student("Aman", &population());
        let zoya = dir.add_student("Zoya", &population());
        for present in [vec![aman.id, zoya.id], vec![aman.id], vec![aman.id], vec![]] {
            dir.add_record(record(&population(), (2024, 2, 1), &present));
        }
        let admin = dir.add_user(Role::Admin, None);
        let ctx = test_context(&dir);

        let report = ReportService::new(&ctx)
            .class_report(&session_for(&admin), &population())
            .await
            .unwrap();

        assert_eq!(report.total_lectures, 4);
        assert_eq!(report.students.len(), 2);
        assert_eq!(report.students[0].name, "Aman");
        assert_eq!(report.students[0].percentage, 75);
        assert_eq!(report.students[0].standing, Standing::Good);
        assert_eq!(report.students[1].percentage, 25);
        assert_eq!(report.students[1].standing, Standing::AtRisk);
    }

    #[tokio::test]
    async fn test_students_cannot_read_class_reports() {
        let dir = InMemoryDirectory::new();
        let riya = dir.add_student("Riya", &population());
        let ctx = test_context(&dir);

        let err = ReportService::new(&ctx)
            .export_class_report(
                &SessionContext::new(riya.user_id, Role::Student, "s"),
                &population(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_export_names_file_after_population() {
        let dir = InMemoryDirectory::new();
        dir.add_student("Riya", &population());
        let faculty = dir.add_faculty("Rao");
        let ctx = test_context(&dir);

        let export = ReportService::new(&ctx)
            .export_class_report(
                &SessionContext::new(faculty.user_id, Role::Faculty, "s"),
                &population(),
            )
            .await
            .unwrap();

        assert_eq!(export.file_name, "Attendance_Report_BCA_A_Sem3.xlsx");
        assert!(export.bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_admin_overview_splits_averages() {
        let dir = InMemoryDirectory::new();
        dir.add_student("Riya", &population());
        dir.add_faculty("Rao");
        let admin = dir.add_user(Role::Admin, None);
        dir.add_record(record(&population(), (2024, 2, 1), &[]));
        dir.set_averages(vec![
            ClassSemesterAverage {
                kind: AverageKind::Class,
                label: "BCA-A".to_string(),
                average: 62.5,
            },
            ClassSemesterAverage {
                kind: AverageKind::Semester,
                label: "Semester 3".to_string(),
                average: 62.5,
            },
            ClassSemesterAverage {
                kind: AverageKind::Class,
                label: "BCA-B".to_string(),
                average: 40.0,
            },
        ]);
        let ctx = test_context(&dir);

        let overview = ReportService::new(&ctx)
            .admin_overview(&session_for(&admin))
            .await
            .unwrap();

        assert_eq!(overview.class_wise.len(), 2);
        assert_eq!(overview.semester_wise[0].label, "Semester 3");
        assert_eq!(overview.total_students, 1);
        assert_eq!(overview.total_faculty, 1);
        assert_eq!(overview.total_records, 1);
    }

    #[tokio::test]
    async fn test_overview_is_admin_only() {
        let dir = InMemoryDirectory::new();
        let faculty = dir.add_faculty("Rao");
        let ctx = test_context(&dir);

        let err = ReportService::new(&ctx)
            .admin_overview(&SessionContext::new(faculty.user_id, Role::Faculty, "s"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}

//! Attendance marking service
//!
//! Each submission stores one record holding the complete roster of present
//! students. Repeated submissions for the same lecture are not detected.

use std::collections::HashSet;

use attendance_core::entities::{validate_slot, AttendanceRecord};
use attendance_core::error::DomainError;
use attendance_core::traits::AttendanceQuery;
use attendance_core::value_objects::{DayOfWeek, Population};
use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AttendanceRecordResponse, MarkAttendanceRequest, QuickMarkRequest, StudentResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionContext;

/// Attendance service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    /// Create a new AttendanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record attendance for a scheduled lecture on `date`
    #[instrument(
        skip(self, session, request),
        fields(user_id = %session.user_id, entry_id = %request.timetable_entry_id, date = %request.date)
    )]
    pub async fn mark_attendance(
        &self,
        session: &SessionContext,
        request: MarkAttendanceRequest,
    ) -> ServiceResult<AttendanceRecordResponse> {
        session.require_staff()?;

        let entry = self
            .ctx
            .timetable_repo()
            .find_by_id(request.timetable_entry_id)
            .await?
            .ok_or(DomainError::TimetableEntryNotFound(request.timetable_entry_id))?;

        if !entry.occurs_on(request.date) {
            warn!(scheduled = %entry.day, "Lecture is not held on the requested date");
            return Err(DomainError::LectureNotOnDate {
                scheduled: entry.day.to_string(),
                requested: DayOfWeek::of(request.date).to_string(),
            }
            .into());
        }

        let record = AttendanceRecord::new(
            Uuid::new_v4(),
            request.date,
            entry.start_time,
            entry.end_time,
            entry.subject,
            entry.population,
            request.present_student_ids,
            session.user_id,
        );

        self.save(record).await
    }

    /// Record attendance for an unscheduled lecture
    #[instrument(skip(self, session, request), fields(user_id = %session.user_id))]
    pub async fn quick_mark(
        &self,
        session: &SessionContext,
        request: QuickMarkRequest,
    ) -> ServiceResult<AttendanceRecordResponse> {
        session.require_staff()?;
        validate_slot(request.start_time, request.end_time)?;

        let subject = request.subject.trim();
        if subject.is_empty() {
            return Err(ServiceError::validation("subject is required"));
        }

        let record = AttendanceRecord::new(
            Uuid::new_v4(),
            request.date.unwrap_or_else(|| Utc::now().date_naive()),
            request.start_time,
            request.end_time,
            subject.to_string(),
            request.population(),
            request.present_student_ids,
            session.user_id,
        );

        self.save(record).await
    }

    /// Students eligible for marking, by name
    #[instrument(skip(self, session, population), fields(population = %population))]
    pub async fn population_roster(
        &self,
        session: &SessionContext,
        population: &Population,
    ) -> ServiceResult<Vec<StudentResponse>> {
        session.require_staff()?;
        let students = self.ctx.student_repo().find_by_population(population).await?;
        Ok(students.iter().map(StudentResponse::from).collect())
    }

    /// Records of a population, by date then start time
    #[instrument(skip(self, session, query), fields(population = %query.population))]
    pub async fn list_records(
        &self,
        session: &SessionContext,
        query: &AttendanceQuery,
    ) -> ServiceResult<Vec<AttendanceRecordResponse>> {
        session.require_staff()?;
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(ServiceError::validation("'from' must not be after 'to'"));
            }
        }

        let records = self.ctx.attendance_repo().find(query).await?;
        Ok(records.iter().map(AttendanceRecordResponse::from).collect())
    }

    /// Delete a record (admin only)
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn delete_record(&self, session: &SessionContext, record_id: Uuid) -> ServiceResult<()> {
        session.require_admin()?;
        self.ctx.attendance_repo().delete(record_id).await?;

        info!(record_id = %record_id, "Attendance record deleted");

        Ok(())
    }

    async fn save(&self, record: AttendanceRecord) -> ServiceResult<AttendanceRecordResponse> {
        self.check_roster(&record).await?;
        self.ctx.attendance_repo().create(&record).await?;

        info!(
            record_id = %record.id,
            population = %record.population,
            present = record.present_student_ids.len(),
            "Attendance recorded"
        );

        Ok(AttendanceRecordResponse::from(&record))
    }

    /// Every present id must be a student of the record's population
    async fn check_roster(&self, record: &AttendanceRecord) -> ServiceResult<()> {
        let enrolled: HashSet<Uuid> = self
            .ctx
            .student_repo()
            .find_by_population(&record.population)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        let foreign: Vec<Uuid> = record
            .present_student_ids
            .iter()
            .filter(|id| !enrolled.contains(id))
            .copied()
            .collect();

        if !foreign.is_empty() {
            warn!(
                population = %record.population,
                rejected = foreign.len(),
                "Roster contains students outside the class"
            );
            return Err(DomainError::StudentsNotInPopulation(foreign).into());
        }

        Ok(())
    }
}

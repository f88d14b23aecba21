//! Timetable service
//!
//! Faculty manage their own weekly lecture slots; admins manage any slot.
//! Overlapping slots are allowed.

use std::collections::BTreeSet;

use attendance_core::entities::TimetableEntry;
use attendance_core::error::DomainError;
use attendance_core::value_objects::{DayOfWeek, Population, Role};
use chrono::NaiveDate;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CreateTimetableEntryRequest, FilterOptionsResponse, PopulationResponse, TimetableEntryResponse,
    TimetableQuery, TimetableResponse, UpdateTimetableEntryRequest,
};

use super::auth::non_blank;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionContext;

/// Timetable service
pub struct TimetableService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TimetableService<'a> {
    /// Create a new TimetableService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, session, request), fields(user_id = %session.user_id))]
    pub async fn create_entry(
        &self,
        session: &SessionContext,
        request: CreateTimetableEntryRequest,
    ) -> ServiceResult<TimetableEntryResponse> {
        session.require_staff()?;
        let owner = self.resolve_owner(session, request.faculty_id).await?;

        let entry = TimetableEntry::new(
            Uuid::new_v4(),
            request.day,
            request.start_time,
            request.end_time,
            request.subject.trim().to_string(),
            request.population(),
            owner,
        )?;

        self.ctx.timetable_repo().create(&entry).await?;

        info!(entry_id = %entry.id, faculty_id = %owner, day = %entry.day, "Timetable entry created");

        Ok(TimetableEntryResponse::from(&entry))
    }

    #[instrument(skip(self, session, request), fields(user_id = %session.user_id))]
    pub async fn update_entry(
        &self,
        session: &SessionContext,
        entry_id: Uuid,
        request: UpdateTimetableEntryRequest,
    ) -> ServiceResult<TimetableEntryResponse> {
        let mut entry = self.owned_entry(session, entry_id).await?;

        let population = Population::new(
            non_blank(request.course.as_deref()).unwrap_or_else(|| entry.population.course.clone()),
            non_blank(request.class.as_deref()).unwrap_or_else(|| entry.population.class.clone()),
            request.semester.unwrap_or(entry.population.semester),
        );
        let subject = non_blank(request.subject.as_deref()).unwrap_or_else(|| entry.subject.clone());

        entry.reschedule(
            request.day.unwrap_or(entry.day),
            request.start_time.unwrap_or(entry.start_time),
            request.end_time.unwrap_or(entry.end_time),
            subject,
            population,
        )?;

        self.ctx.timetable_repo().update(&entry).await?;

        info!(entry_id = %entry_id, "Timetable entry updated");

        Ok(TimetableEntryResponse::from(&entry))
    }

    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn delete_entry(&self, session: &SessionContext, entry_id: Uuid) -> ServiceResult<()> {
        self.owned_entry(session, entry_id).await?;
        self.ctx.timetable_repo().delete(entry_id).await?;

        info!(entry_id = %entry_id, "Timetable entry deleted");

        Ok(())
    }

    /// The caller's view of `GET /timetable`
    pub async fn timetable_for(
        &self,
        session: &SessionContext,
        query: &TimetableQuery,
    ) -> ServiceResult<TimetableResponse> {
        match session.role {
            Role::Faculty => self.faculty_timetable(session).await,
            Role::Student => self.student_timetable(session).await,
            Role::Admin => {
                let population = query.population().ok_or_else(|| {
                    ServiceError::validation("class, course and semester are required")
                })?;
                self.population_timetable(&population).await
            }
        }
    }

    /// A faculty member's own slots, by day then start time
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn faculty_timetable(
        &self,
        session: &SessionContext,
    ) -> ServiceResult<TimetableResponse> {
        session.require_role(&[Role::Faculty])?;
        let entries = self
            .ctx
            .timetable_repo()
            .find_by_faculty(session.user_id)
            .await?;

        Ok(grid(None, &entries))
    }

    /// The weekly grid of the caller's own population
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn student_timetable(
        &self,
        session: &SessionContext,
    ) -> ServiceResult<TimetableResponse> {
        session.require_role(&[Role::Student])?;
        let student = self
            .ctx
            .student_repo()
            .find_by_user_id(session.user_id)
            .await?
            .ok_or(DomainError::StudentNotFound(session.user_id))?;

        self.population_timetable(&student.population).await
    }

    async fn population_timetable(&self, population: &Population) -> ServiceResult<TimetableResponse> {
        let mut entries = self.ctx.timetable_repo().find_by_population(population).await?;
        entries.sort_by_key(|e| (e.start_time, e.day));

        Ok(grid(Some(population), &entries))
    }

    /// Lectures of a population on the weekday of `date`, by start time
    #[instrument(skip(self, session, population), fields(population = %population))]
    pub async fn lectures_for_date(
        &self,
        session: &SessionContext,
        population: &Population,
        date: NaiveDate,
    ) -> ServiceResult<Vec<TimetableEntryResponse>> {
        session.require_staff()?;
        let entries = self
            .ctx
            .timetable_repo()
            .find_for_day(population, DayOfWeek::of(date))
            .await?;

        Ok(entries.iter().map(TimetableEntryResponse::from).collect())
    }

    /// Distinct semesters, courses, classes and populations among students
    #[instrument(skip(self, session))]
    pub async fn filter_options(
        &self,
        session: &SessionContext,
    ) -> ServiceResult<FilterOptionsResponse> {
        session.require_staff()?;
        let populations = self.ctx.student_repo().list_populations().await?;
        Ok(filter_options(&populations))
    }

    /// Owner of a new entry: faculty own what they create, admins may assign
    async fn resolve_owner(
        &self,
        session: &SessionContext,
        requested: Option<Uuid>,
    ) -> ServiceResult<Uuid> {
        match (session.role, requested) {
            (Role::Admin, Some(faculty_id)) => {
                self.ctx
                    .faculty_repo()
                    .find_by_user_id(faculty_id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::validation(format!("{faculty_id} is not a faculty account"))
                    })?;
                Ok(faculty_id)
            }
            (Role::Faculty, Some(other)) if other != session.user_id => Err(
                ServiceError::permission_denied("faculty may only schedule their own lectures"),
            ),
            _ => Ok(session.user_id),
        }
    }

    /// Fetch an entry the caller may modify
    async fn owned_entry(
        &self,
        session: &SessionContext,
        entry_id: Uuid,
    ) -> ServiceResult<TimetableEntry> {
        session.require_staff()?;
        let entry = self
            .ctx
            .timetable_repo()
            .find_by_id(entry_id)
            .await?
            .ok_or(DomainError::TimetableEntryNotFound(entry_id))?;

        if !session.is_admin() && entry.faculty_id != session.user_id {
            return Err(DomainError::NotEntryOwner.into());
        }

        Ok(entry)
    }
}

/// Distinct `start-end` slots in start order
pub fn time_slots(entries: &[TimetableEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| (e.start_time, e.end_time))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|(start, end)| format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")))
        .collect()
}

fn grid(population: Option<&Population>, entries: &[TimetableEntry]) -> TimetableResponse {
    TimetableResponse {
        population: population.map(PopulationResponse::from),
        entries: entries.iter().map(TimetableEntryResponse::from).collect(),
        time_slots: time_slots(entries),
    }
}

fn filter_options(populations: &[Population]) -> FilterOptionsResponse {
    let semesters: BTreeSet<i32> = populations.iter().map(|p| p.semester).collect();
    let courses: BTreeSet<&str> = populations.iter().map(|p| p.course.as_str()).collect();
    let classes: BTreeSet<&str> = populations.iter().map(|p| p.class.as_str()).collect();
    let groups: BTreeSet<&Population> = populations.iter().collect();

    FilterOptionsResponse {
        semesters: semesters.into_iter().collect(),
        courses: courses.into_iter().map(str::to_string).collect(),
        classes: classes.into_iter().map(str::to_string).collect(),
        groups: groups.into_iter().map(PopulationResponse::from).collect(),
    }
}

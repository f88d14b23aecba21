//! Subject catalog service

use attendance_core::entities::Subject;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{CreateSubjectRequest, SubjectResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionContext;

pub struct SubjectService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubjectService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_subjects(&self) -> ServiceResult<Vec<SubjectResponse>> {
        let subjects = self.ctx.subject_repo().list().await?;
        Ok(subjects.iter().map(SubjectResponse::from).collect())
    }

    #[instrument(skip(self, session, request), fields(user_id = %session.user_id))]
    pub async fn create_subject(
        &self,
        session: &SessionContext,
        request: CreateSubjectRequest,
    ) -> ServiceResult<SubjectResponse> {
        session.require_admin()?;

        let subject = Subject::new(Uuid::new_v4(), &request.name);
        if subject.name.is_empty() {
            return Err(ServiceError::validation("subject name is required"));
        }

        self.ctx.subject_repo().create(&subject).await?;

        info!(subject_id = %subject.id, name = %subject.name, "Subject created");

        Ok(SubjectResponse::from(&subject))
    }

    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn delete_subject(&self, session: &SessionContext, subject_id: Uuid) -> ServiceResult<()> {
        session.require_admin()?;
        self.ctx.subject_repo().delete(subject_id).await?;

        info!(subject_id = %subject_id, "Subject deleted");

        Ok(())
    }
}

// service/application_workflow.rs
use std::sync::Arc;

use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::{
    db::{jobdb::JobExt, notificationdb::NotificationExt, profiledb::ProfileExt},
    models::jobmodel::{ApplicationStatus, JobApplication, JobStatus},
    service::{
        error::ServiceError,
        notification_service::NotificationDispatcher,
        policy::{self, Actor},
    },
};

/// State machine over job applications: pending -> accepted | rejected |
/// withdrawn, all terminal. Applications for the same job are decided
/// independently of each other.
#[derive(Debug, Clone)]
pub struct ApplicationWorkflow<S> {
    store: Arc<S>,
    notifications: NotificationDispatcher<S>,
}

impl<S> ApplicationWorkflow<S>
where
    S: JobExt + ProfileExt + NotificationExt + Send + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            notifications: NotificationDispatcher::new(store.clone()),
            store,
        }
    }

    pub async fn apply(
        &self,
        actor: &Actor,
        job_id: Uuid,
        cover_letter: String,
        proposed_rate: Option<f64>,
    ) -> Result<JobApplication, ServiceError> {
        let profile = self
            .store
            .get_artisan_profile(actor.id)
            .await?
            .ok_or(ServiceError::ArtisanProfileNotFound(actor.id))?;

        let job = self
            .store
            .get_job(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.status != JobStatus::Open {
            return Err(ServiceError::JobNotOpen(job_id, job.status));
        }

        let cover_letter = cover_letter.trim().to_string();
        if cover_letter.is_empty() {
            return Err(ServiceError::Validation(
                "Cover letter is required".to_string(),
            ));
        }

        let proposed_rate = match proposed_rate {
            Some(rate) if rate < 0.0 => {
                return Err(ServiceError::Validation(
                    "Proposed rate must not be negative".to_string(),
                ));
            }
            Some(rate) => Some(BigDecimal::try_from(rate).map_err(|_| {
                ServiceError::Validation("Proposed rate must be a valid number".to_string())
            })?),
            None => None,
        };

        // The unique index on (job_id, artisan_id) decides the duplicate
        // race; the insert comes back empty when it hits.
        let application = self
            .store
            .create_job_application(job_id, profile.id, cover_letter, proposed_rate)
            .await?
            .ok_or(ServiceError::DuplicateApplication {
                job_id,
                artisan_id: profile.id,
            })?;

        if let Some(employer) = self
            .store
            .get_employer_profile_by_id(job.employer_id)
            .await?
        {
            self.notifications
                .notify_new_application(employer.user_id, &job, application.id)
                .await;
        }

        Ok(application)
    }

    pub async fn decide(
        &self,
        actor: &Actor,
        application_id: Uuid,
        decision: ApplicationStatus,
    ) -> Result<JobApplication, ServiceError> {
        if !matches!(
            decision,
            ApplicationStatus::Accepted | ApplicationStatus::Rejected
        ) {
            return Err(ServiceError::Validation(
                "Decision must be accepted or rejected".to_string(),
            ));
        }

        let application = self
            .store
            .get_application(application_id)
            .await?
            .ok_or(ServiceError::ApplicationNotFound(application_id))?;

        let job = self
            .store
            .get_job(application.job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(application.job_id))?;

        let employer = self
            .store
            .get_employer_profile(actor.id)
            .await?
            .ok_or(ServiceError::EmployerProfileNotFound(actor.id))?;

        if !policy::can_decide_application(actor, &employer, &job) {
            return Err(ServiceError::UnauthorizedApplicationAccess(
                actor.id,
                application_id,
            ));
        }

        if application.status.is_terminal() {
            return Err(ServiceError::InvalidApplicationStatus(
                application_id,
                application.status,
            ));
        }

        let updated = match self
            .store
            .update_application_status(application_id, decision)
            .await?
        {
            Some(application) => application,
            None => {
                let current = self
                    .store
                    .get_application(application_id)
                    .await?
                    .ok_or(ServiceError::ApplicationNotFound(application_id))?;
                return Err(ServiceError::InvalidApplicationStatus(
                    application_id,
                    current.status,
                ));
            }
        };

        if let Some(artisan) = self
            .store
            .get_artisan_profile_by_id(updated.artisan_id)
            .await?
        {
            self.notifications
                .notify_application_decided(artisan.user_id, &job.title, decision, updated.id)
                .await;
        }

        Ok(updated)
    }

    pub async fn withdraw(
        &self,
        actor: &Actor,
        application_id: Uuid,
    ) -> Result<JobApplication, ServiceError> {
        let application = self
            .store
            .get_application(application_id)
            .await?
            .ok_or(ServiceError::ApplicationNotFound(application_id))?;

        let profile = self
            .store
            .get_artisan_profile(actor.id)
            .await?
            .ok_or(ServiceError::ArtisanProfileNotFound(actor.id))?;

        if !policy::can_withdraw(actor, &profile, &application) {
            // Ownership failures and state failures surface differently.
            if application.artisan_id == profile.id && application.status.is_terminal() {
                return Err(ServiceError::InvalidApplicationStatus(
                    application_id,
                    application.status,
                ));
            }
            return Err(ServiceError::UnauthorizedApplicationAccess(
                actor.id,
                application_id,
            ));
        }

        let updated = match self
            .store
            .withdraw_application(application_id, profile.id)
            .await?
        {
            Some(application) => application,
            None => {
                let current = self
                    .store
                    .get_application(application_id)
                    .await?
                    .ok_or(ServiceError::ApplicationNotFound(application_id))?;
                return Err(ServiceError::InvalidApplicationStatus(
                    application_id,
                    current.status,
                ));
            }
        };

        // The employer is intentionally not notified of withdrawals.
        Ok(updated)
    }
}

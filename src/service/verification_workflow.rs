// service/verification_workflow.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{notificationdb::NotificationExt, verificationdb::VerificationExt},
    models::{
        usermodel::UserRole,
        verificationmodels::{VerificationLog, VerificationLogStatus, VerificationType},
    },
    service::{
        error::ServiceError,
        notification_service::NotificationDispatcher,
        policy::{self, Actor},
    },
};

/// Reviewer-facing policy knobs, sourced from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewPolicy {
    pub require_rejection_comments: bool,
}

/// State machine over verification logs: pending -> approved | rejected.
/// Both outcomes are terminal; a new review cycle opens a new log row.
#[derive(Debug, Clone)]
pub struct VerificationWorkflow<S> {
    store: Arc<S>,
    notifications: NotificationDispatcher<S>,
    policy: ReviewPolicy,
}

impl<S> VerificationWorkflow<S>
where
    S: VerificationExt + NotificationExt + Send + Sync,
{
    pub fn new(store: Arc<S>, policy: ReviewPolicy) -> Self {
        Self {
            notifications: NotificationDispatcher::new(store.clone()),
            store,
            policy,
        }
    }

    pub async fn approve(
        &self,
        actor: &Actor,
        log_id: Uuid,
        comments: Option<String>,
    ) -> Result<VerificationLog, ServiceError> {
        self.review(actor, log_id, VerificationLogStatus::Approved, comments)
            .await
    }

    pub async fn reject(
        &self,
        actor: &Actor,
        log_id: Uuid,
        comments: Option<String>,
    ) -> Result<VerificationLog, ServiceError> {
        self.review(actor, log_id, VerificationLogStatus::Rejected, comments)
            .await
    }

    async fn review(
        &self,
        actor: &Actor,
        log_id: Uuid,
        decision: VerificationLogStatus,
        comments: Option<String>,
    ) -> Result<VerificationLog, ServiceError> {
        if !policy::can_review(actor) {
            return Err(ServiceError::UnauthorizedReview(actor.id));
        }

        let comments = comments.filter(|c| !c.trim().is_empty());

        if decision == VerificationLogStatus::Rejected
            && self.policy.require_rejection_comments
            && comments.is_none()
        {
            return Err(ServiceError::Validation(
                "Rejection comments are required".to_string(),
            ));
        }

        let log = self
            .store
            .get_verification_log(log_id)
            .await?
            .ok_or(ServiceError::VerificationLogNotFound(log_id))?;

        if log.status.is_terminal() {
            return Err(ServiceError::InvalidVerificationStatus(log_id, log.status));
        }

        // The pending guard inside the store call decides any race with a
        // concurrent reviewer; a miss means someone else got there first.
        let updated = match self
            .store
            .apply_verification_decision(log_id, actor.id, decision, comments)
            .await?
        {
            Some(log) => log,
            None => {
                let current = self
                    .store
                    .get_verification_log(log_id)
                    .await?
                    .ok_or(ServiceError::VerificationLogNotFound(log_id))?;
                return Err(ServiceError::InvalidVerificationStatus(
                    log_id,
                    current.status,
                ));
            }
        };

        // The transition is committed at this point; notification failures
        // are logged by the dispatcher and do not roll it back.
        match decision {
            VerificationLogStatus::Approved => {
                self.notifications
                    .notify_profile_verified(updated.user_id, updated.comments.as_deref())
                    .await;
            }
            _ => {
                self.notifications
                    .notify_profile_rejected(updated.user_id, updated.comments.as_deref())
                    .await;
            }
        }

        tracing::info!(
            "verification log {} reviewed by {}: {}",
            updated.id,
            actor.id,
            updated.status.to_str()
        );

        Ok(updated)
    }

    /// Opens a fresh review cycle for a user whose last cycle was rejected.
    /// Pending and approved logs block a new submission.
    pub async fn resubmit(&self, actor: &Actor) -> Result<VerificationLog, ServiceError> {
        if actor.role == UserRole::Admin {
            return Err(ServiceError::Validation(
                "Admin accounts are not subject to profile verification".to_string(),
            ));
        }

        if let Some(latest) = self.store.latest_verification_log(actor.id).await? {
            if latest.status != VerificationLogStatus::Rejected {
                return Err(ServiceError::InvalidVerificationStatus(
                    latest.id,
                    latest.status,
                ));
            }
        }

        let log = self
            .store
            .create_verification_log(actor.id, VerificationType::Profile)
            .await?;

        Ok(log)
    }
}

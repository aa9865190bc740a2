// service/notification_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::notificationdb::NotificationExt,
    models::{
        jobmodel::{ApplicationStatus, Job},
        notificationmodel::NotificationType,
    },
    service::error::ServiceError,
};

/// Append-only notification dispatcher. Holds no business logic; the
/// workflow services decide when to call it. Dispatch runs after the state
/// transition has committed, so a failure here is logged and swallowed
/// instead of undoing the transition.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher<S> {
    store: Arc<S>,
}

impl<S> NotificationDispatcher<S>
where
    S: NotificationExt + Send + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn dispatch(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        message: String,
        related_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        self.store
            .create_notification(user_id, notification_type, title, message, related_id)
            .await?;

        Ok(())
    }

    async fn dispatch_best_effort(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        message: String,
        related_id: Option<Uuid>,
    ) {
        if let Err(err) = self
            .dispatch(user_id, notification_type, title, message, related_id)
            .await
        {
            tracing::warn!(
                "failed to dispatch {} notification to {}: {}",
                notification_type.to_str(),
                user_id,
                err
            );
        }
    }

    pub async fn notify_profile_verified(&self, user_id: Uuid, comments: Option<&str>) {
        let mut message =
            "Your profile has been verified by the government agency.".to_string();
        if let Some(comments) = comments {
            message = format!("{} Comments: {}", message, comments);
        }

        self.dispatch_best_effort(
            user_id,
            NotificationType::ProfileVerified,
            "Profile Verified".to_string(),
            message,
            None,
        )
        .await;
    }

    pub async fn notify_profile_rejected(&self, user_id: Uuid, comments: Option<&str>) {
        let message = match comments {
            Some(comments) => format!(
                "Your profile verification has been rejected. Reason: {}",
                comments
            ),
            None => "Your profile verification has been rejected. Please review and update your information.".to_string(),
        };

        self.dispatch_best_effort(
            user_id,
            NotificationType::ProfileRejected,
            "Profile Verification Rejected".to_string(),
            message,
            None,
        )
        .await;
    }

    pub async fn notify_new_application(
        &self,
        employer_user_id: Uuid,
        job: &Job,
        application_id: Uuid,
    ) {
        self.dispatch_best_effort(
            employer_user_id,
            NotificationType::Application,
            "New Job Application".to_string(),
            format!("You received a new application for: {}", job.title),
            Some(application_id),
        )
        .await;
    }

    pub async fn notify_application_decided(
        &self,
        artisan_user_id: Uuid,
        job_title: &str,
        decision: ApplicationStatus,
        application_id: Uuid,
    ) {
        let outcome = match decision {
            ApplicationStatus::Accepted => "accepted",
            _ => "not accepted",
        };
        let title = match decision {
            ApplicationStatus::Accepted => "Application Accepted",
            _ => "Application Rejected",
        };

        self.dispatch_best_effort(
            artisan_user_id,
            NotificationType::Application,
            title.to_string(),
            format!(
                "Your application for \"{}\" has been {}",
                job_title, outcome
            ),
            Some(application_id),
        )
        .await;
    }

    pub async fn notify_new_message(
        &self,
        recipient_id: Uuid,
        subject: Option<&str>,
        sender_id: Uuid,
    ) {
        let title = match subject {
            Some(subject) if !subject.is_empty() => format!("New Message: {}", subject),
            _ => "New Message".to_string(),
        };

        self.dispatch_best_effort(
            recipient_id,
            NotificationType::NewMessage,
            title,
            "You have a new message from a user.".to_string(),
            Some(sender_id),
        )
        .await;
    }
}

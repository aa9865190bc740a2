use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::HttpError,
    models::{
        jobmodel::{ApplicationStatus, JobStatus},
        verificationmodels::VerificationLogStatus,
    },
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Verification log {0} not found")]
    VerificationLogNotFound(Uuid),

    #[error("Verification log {0} has already been reviewed (status {1:?})")]
    InvalidVerificationStatus(Uuid, VerificationLogStatus),

    #[error("User {0} is not allowed to review verifications")]
    UnauthorizedReview(Uuid),

    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Job {0} is not accepting applications (status {1:?})")]
    JobNotOpen(Uuid, JobStatus),

    #[error("Application {0} not found")]
    ApplicationNotFound(Uuid),

    #[error("Application {0} is no longer pending (status {1:?})")]
    InvalidApplicationStatus(Uuid, ApplicationStatus),

    #[error("User {0} is not authorized to act on application {1}")]
    UnauthorizedApplicationAccess(Uuid, Uuid),

    #[error("Artisan profile not found for user {0}")]
    ArtisanProfileNotFound(Uuid),

    #[error("Employer profile not found for user {0}")]
    EmployerProfileNotFound(Uuid),

    #[error("Artisan {artisan_id} has already applied to job {job_id}")]
    DuplicateApplication { job_id: Uuid, artisan_id: Uuid },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::VerificationLogNotFound(_)
            | ServiceError::JobNotFound(_)
            | ServiceError::ApplicationNotFound(_)
            | ServiceError::ArtisanProfileNotFound(_)
            | ServiceError::EmployerProfileNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::InvalidVerificationStatus(_, _)
            | ServiceError::JobNotOpen(_, _)
            | ServiceError::InvalidApplicationStatus(_, _)
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::UnauthorizedReview(_)
            | ServiceError::UnauthorizedApplicationAccess(_, _) => {
                HttpError::forbidden(error.to_string())
            }

            ServiceError::DuplicateApplication { .. } => HttpError::conflict(error.to_string()),

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::VerificationLogNotFound(_)
            | ServiceError::JobNotFound(_)
            | ServiceError::ApplicationNotFound(_)
            | ServiceError::ArtisanProfileNotFound(_)
            | ServiceError::EmployerProfileNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InvalidVerificationStatus(_, _)
            | ServiceError::JobNotOpen(_, _)
            | ServiceError::InvalidApplicationStatus(_, _)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::UnauthorizedReview(_)
            | ServiceError::UnauthorizedApplicationAccess(_, _) => StatusCode::FORBIDDEN,

            ServiceError::DuplicateApplication { .. } => StatusCode::CONFLICT,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

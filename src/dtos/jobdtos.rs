// dtos/jobdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::jobmodel::{ApplicationStatus, ExperienceLevel, Job, JobApplication, JobStatus};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobDto {
    #[validate(length(min = 5, max = 255, message = "Title must be between 5-255 characters"))]
    pub title: String,

    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 1, max = 100, message = "State is required"))]
    pub state: String,

    #[validate(range(min = 0.01, message = "Budget amounts must be greater than zero"))]
    pub budget_min: f64,

    #[validate(range(min = 0.01, message = "Budget amounts must be greater than zero"))]
    pub budget_max: f64,

    #[validate(length(max = 100, message = "Duration must not exceed 100 characters"))]
    pub duration: Option<String>,

    pub experience_level: ExperienceLevel,

    pub required_skills: Option<Vec<String>>,

    pub deadline: Option<DateTime<Utc>>,
}

impl CreateJobDto {
    /// Cross-field checks the derive cannot express.
    pub fn validate_budget_and_deadline(&self) -> Result<(), String> {
        if self.budget_min > self.budget_max {
            return Err("Minimum budget cannot exceed maximum budget".to_string());
        }
        if let Some(deadline) = self.deadline {
            if deadline < Utc::now() {
                return Err("Deadline must be in the future".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Validate)]
pub struct JobListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub state: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateJobStatusDto {
    pub status: JobStatus,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ApplyJobDto {
    #[validate(length(min = 1, message = "Cover letter is required"))]
    pub cover_letter: String,

    #[validate(range(min = 0.0, message = "Proposed rate must not be negative"))]
    pub proposed_rate: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationDecision {
    Accepted,
    Rejected,
}

impl From<ApplicationDecision> for ApplicationStatus {
    fn from(decision: ApplicationDecision) -> Self {
        match decision {
            ApplicationDecision::Accepted => ApplicationStatus::Accepted,
            ApplicationDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DecideApplicationDto {
    pub decision: ApplicationDecision,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobResponseDto {
    pub status: String,
    pub job: Job,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobListResponseDto {
    pub status: String,
    pub jobs: Vec<Job>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationResponseDto {
    pub status: String,
    pub application: JobApplication,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationListResponseDto {
    pub status: String,
    pub applications: Vec<JobApplication>,
}

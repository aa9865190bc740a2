// dtos/verificationdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::verificationmodels::VerificationLog;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct ReviewVerificationDto {
    pub action: ReviewAction,

    #[validate(length(max = 2000, message = "Comments must not exceed 2000 characters"))]
    pub comments: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerificationResponseDto {
    pub status: String,
    pub verification: VerificationLog,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerificationListResponseDto {
    pub status: String,
    pub verifications: Vec<VerificationLog>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerificationDetailResponseDto {
    pub status: String,
    pub verification: VerificationLog,
    pub history: Vec<VerificationLog>,
}

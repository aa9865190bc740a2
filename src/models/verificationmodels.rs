// models/verificationmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "verification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
    Profile,
    Document,
}

impl VerificationType {
    pub fn to_str(&self) -> &str {
        match self {
            VerificationType::Profile => "profile",
            VerificationType::Document => "document",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "verification_log_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationLogStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationLogStatus {
    pub fn to_str(&self) -> &str {
        match self {
            VerificationLogStatus::Pending => "pending",
            VerificationLogStatus::Approved => "approved",
            VerificationLogStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected logs are terminal; a new review cycle
    /// opens a fresh log row instead of reusing an old one.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerificationLogStatus::Pending)
    }
}

/// One row per review cycle. admin_id stays empty until a reviewer acts.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct VerificationLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub verification_type: VerificationType,
    pub status: VerificationLogStatus,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// models/profilemodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "profile_verification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProfileVerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl ProfileVerificationStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ProfileVerificationStatus::Pending => "pending",
            ProfileVerificationStatus::Verified => "verified",
            ProfileVerificationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "availability_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Busy,
    Unavailable,
}

impl AvailabilityStatus {
    pub fn to_str(&self) -> &str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Busy => "busy",
            AvailabilityStatus::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ArtisanProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub years_of_experience: i32,
    pub hourly_rate: Option<BigDecimal>,
    pub skills: Option<String>,
    pub availability_status: AvailabilityStatus,
    pub verification_status: ProfileVerificationStatus,
    pub rating: f32,
    pub total_reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArtisanProfile {
    /// Skills are stored denormalized as a comma-separated list.
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct EmployerProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: Option<String>,
    pub company_type: Option<String>,
    pub company_phone: Option<String>,
    pub company_website: Option<String>,
    pub company_address: Option<String>,
    pub company_description: Option<String>,
    pub verification_status: ProfileVerificationStatus,
    pub rating: f32,
    pub total_reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

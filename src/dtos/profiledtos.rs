// dtos/profiledtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profilemodel::{ArtisanProfile, AvailabilityStatus, EmployerProfile};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateArtisanProfileDto {
    #[validate(length(max = 2000, message = "Bio must not exceed 2000 characters"))]
    pub bio: Option<String>,

    #[validate(length(min = 2, max = 255, message = "Location must be between 2-255 characters"))]
    pub location: Option<String>,

    #[validate(length(min = 2, max = 100, message = "State must be between 2-100 characters"))]
    pub state: Option<String>,

    #[validate(range(min = 0, max = 80, message = "Years of experience must be realistic"))]
    pub years_of_experience: i32,

    #[validate(range(min = 0.0, message = "Hourly rate must not be negative"))]
    pub hourly_rate: Option<f64>,

    pub skills: Option<Vec<String>>,

    pub availability_status: Option<AvailabilityStatus>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateEmployerProfileDto {
    #[validate(length(min = 1, max = 255, message = "Company name must be between 1-255 characters"))]
    pub company_name: Option<String>,

    #[validate(length(max = 100, message = "Company type must not exceed 100 characters"))]
    pub company_type: Option<String>,

    #[validate(length(max = 20, message = "Company phone must not exceed 20 characters"))]
    pub company_phone: Option<String>,

    #[validate(url(message = "Company website must be a valid URL"))]
    pub company_website: Option<String>,

    pub company_address: Option<String>,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub company_description: Option<String>,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct ArtisanListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    pub state: Option<String>,
    pub skill: Option<String>,
    pub verified_only: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtisanProfileResponseDto {
    pub status: String,
    pub profile: ArtisanProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployerProfileResponseDto {
    pub status: String,
    pub profile: EmployerProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtisanListResponseDto {
    pub status: String,
    pub artisans: Vec<ArtisanProfile>,
}

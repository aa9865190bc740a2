// handler/profiles.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use sqlx::types::BigDecimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::profiledb::ProfileExt,
    dtos::profiledtos::{
        ArtisanListQueryDto, ArtisanListResponseDto, ArtisanProfileResponseDto,
        EmployerProfileResponseDto, UpdateArtisanProfileDto, UpdateEmployerProfileDto,
    },
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::{profilemodel::AvailabilityStatus, usermodel::UserRole},
    AppState,
};

pub fn profile_handler() -> Router {
    Router::new()
        .route(
            "/artisan/me",
            get(get_my_artisan_profile)
                .put(update_artisan_profile)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Artisan])
                })),
        )
        .route(
            "/employer/me",
            get(get_my_employer_profile)
                .put(update_employer_profile)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Employer])
                })),
        )
        .route(
            "/artisans",
            get(list_artisans).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Employer, UserRole::Admin])
            })),
        )
        .route(
            "/artisans/:profile_id",
            get(get_artisan).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Employer, UserRole::Admin])
            })),
        )
}

pub async fn get_my_artisan_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_artisan_profile(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Artisan profile not found"))?;

    Ok(Json(ArtisanProfileResponseDto {
        status: "success".to_string(),
        profile,
    }))
}

pub async fn update_artisan_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateArtisanProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let hourly_rate = match body.hourly_rate {
        Some(rate) => Some(
            BigDecimal::try_from(rate)
                .map_err(|_| HttpError::bad_request("Hourly rate must be a valid number"))?,
        ),
        None => None,
    };

    let skills = body.skills.map(|skills| {
        skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    });

    let profile = app_state
        .db_client
        .update_artisan_profile(
            user.user.id,
            body.bio,
            body.location,
            body.state,
            body.years_of_experience,
            hourly_rate,
            skills,
            body.availability_status
                .unwrap_or(AvailabilityStatus::Available),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ArtisanProfileResponseDto {
        status: "success".to_string(),
        profile,
    }))
}

pub async fn get_my_employer_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_employer_profile(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Employer profile not found"))?;

    Ok(Json(EmployerProfileResponseDto {
        status: "success".to_string(),
        profile,
    }))
}

pub async fn update_employer_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateEmployerProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let profile = app_state
        .db_client
        .update_employer_profile(
            user.user.id,
            body.company_name,
            body.company_type,
            body.company_phone,
            body.company_website,
            body.company_address,
            body.company_description,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(EmployerProfileResponseDto {
        status: "success".to_string(),
        profile,
    }))
}

pub async fn list_artisans(
    Query(query_params): Query<ArtisanListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let artisans = app_state
        .db_client
        .list_artisans(
            query_params.state.as_deref(),
            query_params.skill.as_deref(),
            query_params.verified_only.unwrap_or(true),
            page as u32,
            limit,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ArtisanListResponseDto {
        status: "success".to_string(),
        artisans,
    }))
}

pub async fn get_artisan(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_artisan_profile_by_id(profile_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Artisan profile not found"))?;

    Ok(Json(ArtisanProfileResponseDto {
        status: "success".to_string(),
        profile,
    }))
}

// handler/applications.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, profiledb::ProfileExt},
    dtos::jobdtos::{
        ApplicationListResponseDto, ApplicationResponseDto, ApplyJobDto, DecideApplicationDto,
    },
    dtos::userdtos::RequestQueryDto,
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::{application_workflow::ApplicationWorkflow, policy::Actor},
    AppState,
};

pub fn applications_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(list_applications).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/mine",
            get(get_my_applications).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Artisan])
            })),
        )
        .route("/:application_id", get(get_application))
        .route(
            "/:application_id/decide",
            put(decide_application).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Employer])
            })),
        )
        .route(
            "/:application_id/withdraw",
            put(withdraw_application).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Artisan])
            })),
        )
}

pub async fn apply_to_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<ApplyJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let workflow = ApplicationWorkflow::new(Arc::new(app_state.db_client.clone()));
    let actor = Actor::from(&user.user);

    let cover_letter = ammonia::clean(&body.cover_letter);

    let application = workflow
        .apply(&actor, job_id, cover_letter, body.proposed_rate)
        .await?;

    Ok(Json(ApplicationResponseDto {
        status: "success".to_string(),
        application,
    }))
}

pub async fn get_my_applications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_artisan_profile(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Artisan profile not found"))?;

    let applications = app_state
        .db_client
        .get_artisan_applications(profile.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApplicationListResponseDto {
        status: "success".to_string(),
        applications,
    }))
}

pub async fn get_job_applications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if user.user.role == UserRole::Employer {
        let profile = app_state
            .db_client
            .get_employer_profile(user.user.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::not_found("Employer profile not found"))?;

        if job.employer_id != profile.id {
            return Err(HttpError::forbidden("Job not found or access denied"));
        }
    }

    let applications = app_state
        .db_client
        .get_job_applications(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApplicationListResponseDto {
        status: "success".to_string(),
        applications,
    }))
}

pub async fn list_applications(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let applications = app_state
        .db_client
        .list_applications(page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApplicationListResponseDto {
        status: "success".to_string(),
        applications,
    }))
}

pub async fn get_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let application = app_state
        .db_client
        .get_application(application_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Application not found"))?;

    // Visible to the applicant, the job owner, and admins.
    let allowed = match user.user.role {
        UserRole::Admin => true,
        UserRole::Artisan => {
            let profile = app_state
                .db_client
                .get_artisan_profile(user.user.id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;
            profile.map(|p| p.id == application.artisan_id).unwrap_or(false)
        }
        UserRole::Employer => {
            let profile = app_state
                .db_client
                .get_employer_profile(user.user.id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;
            let job = app_state
                .db_client
                .get_job(application.job_id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;
            match (profile, job) {
                (Some(profile), Some(job)) => job.employer_id == profile.id,
                _ => false,
            }
        }
    };

    if !allowed {
        return Err(HttpError::forbidden("Application not found or access denied"));
    }

    Ok(Json(ApplicationResponseDto {
        status: "success".to_string(),
        application,
    }))
}

pub async fn decide_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(application_id): Path<Uuid>,
    Json(body): Json<DecideApplicationDto>,
) -> Result<impl IntoResponse, HttpError> {
    let workflow = ApplicationWorkflow::new(Arc::new(app_state.db_client.clone()));
    let actor = Actor::from(&user.user);

    let application = workflow
        .decide(&actor, application_id, body.decision.into())
        .await?;

    Ok(Json(ApplicationResponseDto {
        status: "success".to_string(),
        application,
    }))
}

pub async fn withdraw_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let workflow = ApplicationWorkflow::new(Arc::new(app_state.db_client.clone()));
    let actor = Actor::from(&user.user);

    let application = workflow.withdraw(&actor, application_id).await?;

    Ok(Json(ApplicationResponseDto {
        status: "success".to_string(),
        application,
    }))
}

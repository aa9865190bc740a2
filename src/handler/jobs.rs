// handler/jobs.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use sqlx::types::BigDecimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, profiledb::ProfileExt},
    dtos::jobdtos::{
        CreateJobDto, JobListQueryDto, JobListResponseDto, JobResponseDto, UpdateJobStatusDto,
    },
    dtos::userdtos::RequestQueryDto,
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(list_open_jobs).post(create_job).layer(middleware::from_fn(
                |state, req, next| {
                    role_check(
                        state,
                        req,
                        next,
                        vec![UserRole::Artisan, UserRole::Employer, UserRole::Admin],
                    )
                },
            )),
        )
        .route(
            "/mine",
            get(get_my_jobs).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Employer])
            })),
        )
        .route(
            "/all",
            get(get_all_jobs).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route("/:job_id", get(get_job))
        .route(
            "/:job_id/status",
            put(update_job_status).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Employer])
            })),
        )
        .route(
            "/:job_id/apply",
            post(crate::handler::applications::apply_to_job).layer(middleware::from_fn(
                |state, req, next| role_check(state, req, next, vec![UserRole::Artisan]),
            )),
        )
        .route(
            "/:job_id/applications",
            get(crate::handler::applications::get_job_applications).layer(
                middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Employer, UserRole::Admin])
                }),
            ),
        )
}

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    if user.user.role != UserRole::Employer {
        return Err(HttpError::forbidden("Only employers can post jobs"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    body.validate_budget_and_deadline()
        .map_err(HttpError::bad_request)?;

    let employer_profile = app_state
        .db_client
        .get_employer_profile(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::bad_request("Please complete your employer profile before posting jobs")
        })?;

    let budget_min = BigDecimal::try_from(body.budget_min)
        .map_err(|_| HttpError::bad_request("Invalid minimum budget"))?;
    let budget_max = BigDecimal::try_from(body.budget_max)
        .map_err(|_| HttpError::bad_request("Invalid maximum budget"))?;

    let required_skills = body.required_skills.map(|skills| {
        skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    });

    let job = app_state
        .db_client
        .create_job(
            employer_profile.id,
            body.title,
            body.description,
            body.category,
            body.location,
            body.state,
            budget_min,
            budget_max,
            body.duration,
            body.experience_level,
            required_skills,
            body.deadline,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("job {} posted by employer {}", job.id, employer_profile.id);

    Ok(Json(JobResponseDto {
        status: "success".to_string(),
        job,
    }))
}

pub async fn list_open_jobs(
    Query(query_params): Query<JobListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let jobs = app_state
        .db_client
        .list_open_jobs(
            query_params.category.as_deref(),
            query_params.state.as_deref(),
            query_params.search.as_deref(),
            page as u32,
            limit,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = app_state
        .db_client
        .count_open_jobs(
            query_params.category.as_deref(),
            query_params.state.as_deref(),
            query_params.search.as_deref(),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(JobListResponseDto {
        status: "success".to_string(),
        jobs,
        results,
    }))
}

pub async fn get_my_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let employer_profile = app_state
        .db_client
        .get_employer_profile(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Employer profile not found"))?;

    let jobs = app_state
        .db_client
        .get_employer_jobs(employer_profile.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = jobs.len() as i64;

    Ok(Json(JobListResponseDto {
        status: "success".to_string(),
        jobs,
        results,
    }))
}

pub async fn get_all_jobs(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let jobs = app_state
        .db_client
        .get_jobs(page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = jobs.len() as i64;

    Ok(Json(JobListResponseDto {
        status: "success".to_string(),
        jobs,
        results,
    }))
}

pub async fn get_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    Ok(Json(JobResponseDto {
        status: "success".to_string(),
        job,
    }))
}

pub async fn update_job_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<UpdateJobStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let employer_profile = app_state
        .db_client
        .get_employer_profile(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Employer profile not found"))?;

    // Ownership is enforced by the guarded update itself.
    let job = app_state
        .db_client
        .update_job_status(job_id, employer_profile.id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found or access denied"))?;

    Ok(Json(JobResponseDto {
        status: "success".to_string(),
        job,
    }))
}

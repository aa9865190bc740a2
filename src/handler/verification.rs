// handler/verification.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::verificationdb::VerificationExt,
    dtos::userdtos::RequestQueryDto,
    dtos::verificationdtos::{
        ReviewAction, ReviewVerificationDto, VerificationDetailResponseDto,
        VerificationListResponseDto, VerificationResponseDto,
    },
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::{
        policy::Actor,
        verification_workflow::{ReviewPolicy, VerificationWorkflow},
    },
    AppState,
};

pub fn verification_handler() -> Router {
    Router::new()
        .route(
            "/status",
            get(get_verification_status).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Artisan, UserRole::Employer])
            })),
        )
        .route(
            "/resubmit",
            post(resubmit_verification).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Artisan, UserRole::Employer])
            })),
        )
        .route(
            "/admin/pending",
            get(get_pending_verifications).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/admin/:verification_id",
            get(get_verification_detail).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/admin/:verification_id/review",
            put(review_verification).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn get_verification_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let verification = app_state
        .db_client
        .latest_verification_log(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("No verification record found"))?;

    Ok(Json(VerificationResponseDto {
        status: "success".to_string(),
        verification,
    }))
}

pub async fn resubmit_verification(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let workflow = VerificationWorkflow::new(
        Arc::new(app_state.db_client.clone()),
        ReviewPolicy {
            require_rejection_comments: app_state.env.require_rejection_comments,
        },
    );

    let actor = Actor::from(&user.user);
    let verification = workflow.resubmit(&actor).await?;

    Ok(Json(VerificationResponseDto {
        status: "success".to_string(),
        verification,
    }))
}

pub async fn get_pending_verifications(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let verifications = app_state
        .db_client
        .get_pending_verifications(page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = app_state
        .db_client
        .count_pending_verifications()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(VerificationListResponseDto {
        status: "success".to_string(),
        verifications,
        results,
    }))
}

pub async fn get_verification_detail(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(verification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let verification = app_state
        .db_client
        .get_verification_log(verification_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Verification not found"))?;

    let history = app_state
        .db_client
        .get_verification_history(verification.user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(VerificationDetailResponseDto {
        status: "success".to_string(),
        verification,
        history,
    }))
}

pub async fn review_verification(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(verification_id): Path<Uuid>,
    Json(body): Json<ReviewVerificationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let workflow = VerificationWorkflow::new(
        Arc::new(app_state.db_client.clone()),
        ReviewPolicy {
            require_rejection_comments: app_state.env.require_rejection_comments,
        },
    );

    let actor = Actor::from(&auth.user);
    let comments = body.comments.map(|c| ammonia::clean(&c));

    let verification = match body.action {
        ReviewAction::Approve => workflow.approve(&actor, verification_id, comments).await?,
        ReviewAction::Reject => workflow.reject(&actor, verification_id, comments).await?,
    };

    Ok(Json(VerificationResponseDto {
        status: "success".to_string(),
        verification,
    }))
}

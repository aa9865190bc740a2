// handler/notification_handler.rs
use std::sync::Arc;

use axum::{
    extract::Query,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::notificationdb::NotificationExt,
    dtos::notificationdtos::{MarkReadDto, NotificationListResponseDto, NotificationQueryDto},
    dtos::userdtos::Response,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn notification_routes() -> Router {
    Router::new()
        .route("/", get(get_user_notifications))
        .route("/read", post(mark_notifications_read))
        .route("/read-all", post(mark_all_notifications_read))
        .route("/unread-count", get(get_unread_count))
}

async fn get_user_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(pagination): Query<NotificationQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    pagination
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(20).min(100);

    let notifications = app_state
        .db_client
        .get_notifications(auth.user.id, page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(format!("Failed to fetch notifications: {}", e)))?;

    let total = app_state
        .db_client
        .count_notifications(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(format!("Failed to count notifications: {}", e)))?;

    let unread_count = app_state
        .db_client
        .unread_notification_count(auth.user.id)
        .await
        .map_err(|e| {
            HttpError::server_error(format!("Failed to count unread notifications: {}", e))
        })?;

    let response = NotificationListResponseDto {
        status: "success".to_string(),
        notifications,
        total,
        unread_count,
        page: page as u32,
        limit: limit as u32,
    };

    Ok(Json(response))
}

async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .db_client
        .unread_notification_count(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(format!("Failed to count notifications: {}", e)))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "unread_count": count
        }
    })))
}

async fn mark_notifications_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(payload): Json<MarkReadDto>,
) -> Result<impl IntoResponse, HttpError> {
    if let Some(notification_ids) = payload.notification_ids {
        app_state
            .db_client
            .mark_notifications_read(auth.user.id, &notification_ids)
            .await
            .map_err(|e| {
                HttpError::server_error(format!("Failed to mark notifications as read: {}", e))
            })?;
    }

    Ok(Json(Response {
        status: "success",
        message: "Notifications marked as read".to_string(),
    }))
}

async fn mark_all_notifications_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .db_client
        .mark_all_notifications_read(auth.user.id)
        .await
        .map_err(|e| {
            HttpError::server_error(format!("Failed to mark notifications as read: {}", e))
        })?;

    Ok(Json(Response {
        status: "success",
        message: format!("{} notifications marked as read", updated),
    }))
}

// handler/messages.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{messagedb::MessageExt, userdb::UserExt},
    dtos::messagedtos::{MessageListResponseDto, MessageResponseDto, SendMessageDto},
    dtos::userdtos::{RequestQueryDto, Response},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    service::notification_service::NotificationDispatcher,
    AppState,
};

pub fn messages_handler() -> Router {
    Router::new()
        .route("/", get(get_inbox).post(send_message))
        .route("/conversation/:user_id", get(get_conversation))
        .route("/conversation/:user_id/read", post(mark_conversation_read))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.recipient_id == auth.user.id {
        return Err(HttpError::bad_request("Invalid recipient"));
    }

    let recipient = app_state
        .db_client
        .get_user(Some(body.recipient_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Recipient not found"))?;

    let message_body = ammonia::clean(&body.message);
    if message_body.trim().is_empty() {
        return Err(HttpError::bad_request("Message cannot be empty"));
    }

    let message = app_state
        .db_client
        .create_message(auth.user.id, recipient.id, body.subject.clone(), message_body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let dispatcher = NotificationDispatcher::new(Arc::new(app_state.db_client.clone()));
    dispatcher
        .notify_new_message(recipient.id, body.subject.as_deref(), auth.user.id)
        .await;

    Ok(Json(MessageResponseDto {
        status: "success".to_string(),
        message,
    }))
}

pub async fn get_inbox(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query_params): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(20);

    let messages = app_state
        .db_client
        .get_inbox(auth.user.id, page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let unread_count = app_state
        .db_client
        .unread_message_count(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MessageListResponseDto {
        status: "success".to_string(),
        messages,
        unread_count,
    }))
}

pub async fn get_conversation(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .db_client
        .get_conversation(auth.user.id, user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let unread_count = app_state
        .db_client
        .unread_message_count(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MessageListResponseDto {
        status: "success".to_string(),
        messages,
        unread_count,
    }))
}

pub async fn mark_conversation_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .db_client
        .mark_conversation_read(auth.user.id, user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: format!("{} messages marked as read", updated),
    }))
}

// dtos/messagedtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::messagemodel::Message;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    pub recipient_id: Uuid,

    #[validate(length(max = 255, message = "Subject must not exceed 255 characters"))]
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub status: String,
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct MessageListResponseDto {
    pub status: String,
    pub messages: Vec<Message>,
    pub unread_count: i64,
}

// dtos/notificationdtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::notificationmodel::Notification;

#[derive(Serialize, Deserialize, Validate)]
pub struct NotificationQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadDto {
    pub notification_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponseDto {
    pub status: String,
    pub notifications: Vec<Notification>,
    pub total: i64,
    pub unread_count: i64,
    pub page: u32,
    pub limit: u32,
}

// db/notificationdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::notificationmodel::{Notification, NotificationType};

const NOTIFICATION_COLUMNS: &str = r#"
    id, user_id, notification_type, title, message, related_id, is_read, created_at
"#;

#[async_trait]
pub trait NotificationExt {
    async fn create_notification(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        message: String,
        related_id: Option<Uuid>,
    ) -> Result<Notification, Error>;

    async fn get_notifications(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Notification>, Error>;

    async fn count_notifications(&self, user_id: Uuid) -> Result<i64, Error>;

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, Error>;

    async fn mark_notifications_read(
        &self,
        user_id: Uuid,
        notification_ids: &[Uuid],
    ) -> Result<u64, Error>;

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64, Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn create_notification(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        message: String,
        related_id: Option<Uuid>,
    ) -> Result<Notification, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (user_id, notification_type, title, message, related_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(notification_type)
        .bind(title)
        .bind(message)
        .bind(related_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_notifications(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Notification>, Error> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_notifications(&self, user_id: Uuid) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn mark_notifications_read(
        &self,
        user_id: Uuid,
        notification_ids: &[Uuid],
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE user_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(notification_ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE user_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

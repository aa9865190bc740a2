// db/messagedb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::messagemodel::Message;

const MESSAGE_COLUMNS: &str = r#"
    id, sender_id, recipient_id, subject, body, is_read, read_at, created_at
"#;

#[async_trait]
pub trait MessageExt {
    async fn create_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        subject: Option<String>,
        body: String,
    ) -> Result<Message, Error>;

    async fn get_inbox(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Message>, Error>;

    async fn get_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<Vec<Message>, Error>;

    async fn mark_conversation_read(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<u64, Error>;

    async fn unread_message_count(&self, user_id: Uuid) -> Result<i64, Error>;
}

#[async_trait]
impl MessageExt for DBClient {
    async fn create_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        subject: Option<String>,
        body: String,
    ) -> Result<Message, Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (sender_id, recipient_id, subject, body)
            VALUES ($1, $2, $3, $4)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(sender_id)
        .bind(recipient_id)
        .bind(subject)
        .bind(body)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_inbox(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Message>, Error> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE recipient_id = $1
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

    async fn get_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY created_at ASC
            "#
        ))
        .bind(user_id)
        .bind(other_user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_conversation_read(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE, read_at = NOW()
            WHERE recipient_id = $1 AND sender_id = $2 AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .bind(other_user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn unread_message_count(&self, user_id: Uuid) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM messages WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}

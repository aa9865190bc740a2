// db/verificationdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::{
    profilemodel::ProfileVerificationStatus,
    usermodel::UserRole,
    verificationmodels::{VerificationLog, VerificationLogStatus, VerificationType},
};

const LOG_COLUMNS: &str = r#"
    id, user_id, admin_id, verification_type, status, comments,
    created_at, updated_at
"#;

#[async_trait]
pub trait VerificationExt {
    async fn create_verification_log(
        &self,
        user_id: Uuid,
        verification_type: VerificationType,
    ) -> Result<VerificationLog, Error>;

    async fn get_verification_log(
        &self,
        log_id: Uuid,
    ) -> Result<Option<VerificationLog>, Error>;

    async fn latest_verification_log(
        &self,
        user_id: Uuid,
    ) -> Result<Option<VerificationLog>, Error>;

    async fn get_pending_verifications(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<VerificationLog>, Error>;

    async fn count_pending_verifications(&self) -> Result<i64, Error>;

    async fn get_verification_history(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VerificationLog>, Error>;

    /// Applies an admin review decision in one transaction: the log row is
    /// updated only while still pending, the role-matching profile picks up
    /// the new verification status, and an approval flips the user flag.
    /// Returns `None` when the pending guard matched no row.
    async fn apply_verification_decision(
        &self,
        log_id: Uuid,
        admin_id: Uuid,
        decision: VerificationLogStatus,
        comments: Option<String>,
    ) -> Result<Option<VerificationLog>, Error>;
}

#[async_trait]
impl VerificationExt for DBClient {
    async fn create_verification_log(
        &self,
        user_id: Uuid,
        verification_type: VerificationType,
    ) -> Result<VerificationLog, Error> {
        sqlx::query_as::<_, VerificationLog>(&format!(
            r#"
            INSERT INTO verification_logs (user_id, verification_type, status)
            VALUES ($1, $2, 'pending'::verification_log_status)
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(verification_type)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_verification_log(
        &self,
        log_id: Uuid,
    ) -> Result<Option<VerificationLog>, Error> {
        sqlx::query_as::<_, VerificationLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM verification_logs WHERE id = $1"
        ))
        .bind(log_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn latest_verification_log(
        &self,
        user_id: Uuid,
    ) -> Result<Option<VerificationLog>, Error> {
        sqlx::query_as::<_, VerificationLog>(&format!(
            r#"
            SELECT {LOG_COLUMNS}
            FROM verification_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_pending_verifications(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<VerificationLog>, Error> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        sqlx::query_as::<_, VerificationLog>(&format!(
            r#"
            SELECT {LOG_COLUMNS}
            FROM verification_logs
            WHERE status = 'pending'::verification_log_status
            ORDER BY created_at ASC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_pending_verifications(&self) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM verification_logs
            WHERE status = 'pending'::verification_log_status
            "#,
        )
        .fetch_one(&self.pool)
        .await
    }

    async fn get_verification_history(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VerificationLog>, Error> {
        sqlx::query_as::<_, VerificationLog>(&format!(
            r#"
            SELECT {LOG_COLUMNS}
            FROM verification_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn apply_verification_decision(
        &self,
        log_id: Uuid,
        admin_id: Uuid,
        decision: VerificationLogStatus,
        comments: Option<String>,
    ) -> Result<Option<VerificationLog>, Error> {
        let mut tx = self.pool.begin().await?;

        // Conditional update: the pending guard is what prevents two
        // reviewers from both landing a decision on the same log.
        let log = sqlx::query_as::<_, VerificationLog>(&format!(
            r#"
            UPDATE verification_logs
            SET status = $2, admin_id = $3, comments = $4, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'::verification_log_status
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(log_id)
        .bind(decision)
        .bind(admin_id)
        .bind(comments)
        .fetch_optional(&mut *tx)
        .await?;

        let log = match log {
            Some(log) => log,
            None => return Ok(None),
        };

        let role = sqlx::query_scalar::<_, UserRole>("SELECT role FROM users WHERE id = $1")
            .bind(log.user_id)
            .fetch_one(&mut *tx)
            .await?;

        let profile_status = match decision {
            VerificationLogStatus::Approved => ProfileVerificationStatus::Verified,
            _ => ProfileVerificationStatus::Rejected,
        };

        // A user without their profile row is corrupt data; abort rather
        // than land a half-applied decision.
        let updated_profiles = match role {
            UserRole::Artisan => {
                sqlx::query(
                    r#"
                    UPDATE artisan_profiles
                    SET verification_status = $2, updated_at = NOW()
                    WHERE user_id = $1
                    "#,
                )
                .bind(log.user_id)
                .bind(profile_status)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            }
            UserRole::Employer => {
                sqlx::query(
                    r#"
                    UPDATE employer_profiles
                    SET verification_status = $2, updated_at = NOW()
                    WHERE user_id = $1
                    "#,
                )
                .bind(log.user_id)
                .bind(profile_status)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            }
            UserRole::Admin => return Err(Error::RowNotFound),
        };

        if updated_profiles == 0 {
            return Err(Error::RowNotFound);
        }

        if decision == VerificationLogStatus::Approved {
            sqlx::query(
                "UPDATE users SET profile_verified = TRUE, updated_at = NOW() WHERE id = $1",
            )
            .bind(log.user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Some(log))
    }
}

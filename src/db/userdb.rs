// db/userdb.rs
use async_trait::async_trait;
use sqlx::{Error, QueryBuilder};
use uuid::Uuid;

use super::db::DBClient;

use crate::models::usermodel::{User, UserRole, UserStatus};

const USER_COLUMNS: &str = r#"
    id, email, password, first_name, last_name, phone,
    role, status, email_verified, profile_verified,
    created_at, updated_at
"#;

#[async_trait]
pub trait UserExt {
    /// Creates the user together with its role profile and the initial
    /// pending verification log in one transaction.
    async fn save_user(
        &self,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        phone: &str,
        role: UserRole,
    ) -> Result<User, Error>;

    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error>;

    async fn get_users(
        &self,
        role: Option<UserRole>,
        status: Option<UserStatus>,
        search: Option<&str>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<User>, Error>;

    async fn get_user_count(
        &self,
        role: Option<UserRole>,
        status: Option<UserStatus>,
        search: Option<&str>,
    ) -> Result<i64, Error>;

    async fn update_user_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<User, Error>;

    async fn update_user_account(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<User, Error>;

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password_hash: String,
    ) -> Result<User, Error>;

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn save_user(
        &self,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        phone: &str,
        role: UserRole,
    ) -> Result<User, Error> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password, first_name, last_name, phone, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(role)
        .fetch_one(&mut *tx)
        .await?;

        match role {
            UserRole::Artisan => {
                sqlx::query("INSERT INTO artisan_profiles (user_id) VALUES ($1)")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
            }
            UserRole::Employer => {
                sqlx::query("INSERT INTO employer_profiles (user_id) VALUES ($1)")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
            }
            // Admins are provisioned out of band and carry no marketplace profile.
            UserRole::Admin => {}
        }

        if role != UserRole::Admin {
            sqlx::query(
                r#"
                INSERT INTO verification_logs (user_id, verification_type, status)
                VALUES ($1, 'profile'::verification_type, 'pending'::verification_log_status)
                "#,
            )
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(user)
    }

    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error> {
        if let Some(user_id) = user_id {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
            ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
        } else if let Some(email) = email {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
            ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
        } else {
            Ok(None)
        }
    }

    async fn get_users(
        &self,
        role: Option<UserRole>,
        status: Option<UserStatus>,
        search: Option<&str>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<User>, Error> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        let mut builder = QueryBuilder::new(format!(
            "SELECT {USER_COLUMNS} FROM users WHERE TRUE"
        ));
        if let Some(role) = role {
            builder.push(" AND role = ").push_bind(role);
        }
        if let Some(status) = status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            builder
                .push(" AND (email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        builder
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit as i64)
            .push(" OFFSET ")
            .push_bind(offset);

        builder
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await
    }

    async fn get_user_count(
        &self,
        role: Option<UserRole>,
        status: Option<UserStatus>,
        search: Option<&str>,
    ) -> Result<i64, Error> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE TRUE");
        if let Some(role) = role {
            builder.push(" AND role = ").push_bind(role);
        }
        if let Some(status) = status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            builder
                .push(" AND (email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
    }

    async fn update_user_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<User, Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_account(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<User, Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, phone = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password_hash: String,
    ) -> Result<User, Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET password = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

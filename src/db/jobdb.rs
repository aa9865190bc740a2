// db/jobdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::BigDecimal;
use sqlx::{Error, QueryBuilder};
use uuid::Uuid;

use super::db::DBClient;

use crate::models::jobmodel::{
    ApplicationStatus, ExperienceLevel, Job, JobApplication, JobStatus,
};

const JOB_COLUMNS: &str = r#"
    id, employer_id, title, description, category, location, state,
    budget_min, budget_max, duration, experience_level, required_skills,
    status, deadline, posted_date, updated_at
"#;

const APPLICATION_COLUMNS: &str = r#"
    id, job_id, artisan_id, cover_letter, proposed_rate, status, applied_date
"#;

#[async_trait]
pub trait JobExt {
    #[allow(clippy::too_many_arguments)]
    async fn create_job(
        &self,
        employer_id: Uuid,
        title: String,
        description: String,
        category: String,
        location: String,
        state: String,
        budget_min: BigDecimal,
        budget_max: BigDecimal,
        duration: Option<String>,
        experience_level: ExperienceLevel,
        required_skills: Option<String>,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<Job, Error>;

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, Error>;

    async fn list_open_jobs(
        &self,
        category: Option<&str>,
        state: Option<&str>,
        search: Option<&str>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Job>, Error>;

    async fn count_open_jobs(
        &self,
        category: Option<&str>,
        state: Option<&str>,
        search: Option<&str>,
    ) -> Result<i64, Error>;

    async fn get_employer_jobs(&self, employer_id: Uuid) -> Result<Vec<Job>, Error>;

    async fn get_jobs(&self, page: u32, limit: usize) -> Result<Vec<Job>, Error>;

    /// Ownership-guarded status update; `None` when the job does not belong
    /// to the employer (or does not exist).
    async fn update_job_status(
        &self,
        job_id: Uuid,
        employer_id: Uuid,
        status: JobStatus,
    ) -> Result<Option<Job>, Error>;

    /// Inserts with `ON CONFLICT DO NOTHING` against the (job_id, artisan_id)
    /// unique constraint; `None` means a duplicate application.
    async fn create_job_application(
        &self,
        job_id: Uuid,
        artisan_id: Uuid,
        cover_letter: String,
        proposed_rate: Option<BigDecimal>,
    ) -> Result<Option<JobApplication>, Error>;

    async fn get_application(
        &self,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, Error>;

    async fn get_job_applications(&self, job_id: Uuid)
        -> Result<Vec<JobApplication>, Error>;

    async fn get_artisan_applications(
        &self,
        artisan_id: Uuid,
    ) -> Result<Vec<JobApplication>, Error>;

    async fn list_applications(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<JobApplication>, Error>;

    /// Status-guarded transition out of pending; `None` when the guard
    /// matched no row.
    async fn update_application_status(
        &self,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<JobApplication>, Error>;

    /// Guarded exactly as the owner-facing withdrawal: id, owner and pending
    /// status must all match.
    async fn withdraw_application(
        &self,
        application_id: Uuid,
        artisan_id: Uuid,
    ) -> Result<Option<JobApplication>, Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(
        &self,
        employer_id: Uuid,
        title: String,
        description: String,
        category: String,
        location: String,
        state: String,
        budget_min: BigDecimal,
        budget_max: BigDecimal,
        duration: Option<String>,
        experience_level: ExperienceLevel,
        required_skills: Option<String>,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs
            (employer_id, title, description, category, location, state,
            budget_min, budget_max, duration, experience_level,
            required_skills, deadline)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(employer_id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(location)
        .bind(state)
        .bind(budget_min)
        .bind(budget_max)
        .bind(duration)
        .bind(experience_level)
        .bind(required_skills)
        .bind(deadline)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_open_jobs(
        &self,
        category: Option<&str>,
        state: Option<&str>,
        search: Option<&str>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Job>, Error> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        let mut builder = QueryBuilder::new(format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE status = 'open'::job_status"
        ));
        if let Some(category) = category {
            builder.push(" AND category = ").push_bind(category.to_string());
        }
        if let Some(state) = state {
            builder.push(" AND state = ").push_bind(state.to_string());
        }
        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            builder
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        builder
            .push(" ORDER BY posted_date DESC LIMIT ")
            .push_bind(limit as i64)
            .push(" OFFSET ")
            .push_bind(offset);

        builder.build_query_as::<Job>().fetch_all(&self.pool).await
    }

    async fn count_open_jobs(
        &self,
        category: Option<&str>,
        state: Option<&str>,
        search: Option<&str>,
    ) -> Result<i64, Error> {
        let mut builder =
            QueryBuilder::new("SELECT COUNT(*) FROM jobs WHERE status = 'open'::job_status");
        if let Some(category) = category {
            builder.push(" AND category = ").push_bind(category.to_string());
        }
        if let Some(state) = state {
            builder.push(" AND state = ").push_bind(state.to_string());
        }
        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            builder
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
    }

    async fn get_employer_jobs(&self, employer_id: Uuid) -> Result<Vec<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE employer_id = $1
            ORDER BY posted_date DESC
            "#
        ))
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_jobs(&self, page: u32, limit: usize) -> Result<Vec<Job>, Error> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            ORDER BY posted_date DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_job_status(
        &self,
        job_id: Uuid,
        employer_id: Uuid,
        status: JobStatus,
    ) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND employer_id = $2
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(employer_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_job_application(
        &self,
        job_id: Uuid,
        artisan_id: Uuid,
        cover_letter: String,
        proposed_rate: Option<BigDecimal>,
    ) -> Result<Option<JobApplication>, Error> {
        sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            INSERT INTO job_applications (job_id, artisan_id, cover_letter, proposed_rate)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (job_id, artisan_id) DO NOTHING
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(artisan_id)
        .bind(cover_letter)
        .bind(proposed_rate)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_application(
        &self,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, Error> {
        sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications WHERE id = $1"
        ))
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_job_applications(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobApplication>, Error> {
        sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM job_applications
            WHERE job_id = $1
            ORDER BY applied_date DESC
            "#
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_artisan_applications(
        &self,
        artisan_id: Uuid,
    ) -> Result<Vec<JobApplication>, Error> {
        sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM job_applications
            WHERE artisan_id = $1
            ORDER BY applied_date DESC
            "#
        ))
        .bind(artisan_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_applications(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<JobApplication>, Error> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM job_applications
            ORDER BY applied_date DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_application_status(
        &self,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<JobApplication>, Error> {
        sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            UPDATE job_applications
            SET status = $2
            WHERE id = $1 AND status = 'pending'::application_status
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn withdraw_application(
        &self,
        application_id: Uuid,
        artisan_id: Uuid,
    ) -> Result<Option<JobApplication>, Error> {
        sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            UPDATE job_applications
            SET status = 'withdrawn'::application_status
            WHERE id = $1 AND artisan_id = $2 AND status = 'pending'::application_status
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application_id)
        .bind(artisan_id)
        .fetch_optional(&self.pool)
        .await
    }
}

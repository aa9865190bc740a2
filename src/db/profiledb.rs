// db/profiledb.rs
use async_trait::async_trait;
use sqlx::types::BigDecimal;
use sqlx::{Error, QueryBuilder};
use uuid::Uuid;

use super::db::DBClient;

use crate::models::profilemodel::{ArtisanProfile, AvailabilityStatus, EmployerProfile};

const ARTISAN_COLUMNS: &str = r#"
    id, user_id, bio, location, state, years_of_experience, hourly_rate,
    skills, availability_status, verification_status, rating, total_reviews,
    created_at, updated_at
"#;

const EMPLOYER_COLUMNS: &str = r#"
    id, user_id, company_name, company_type, company_phone, company_website,
    company_address, company_description, verification_status, rating,
    total_reviews, created_at, updated_at
"#;

#[async_trait]
pub trait ProfileExt {
    async fn get_artisan_profile(&self, user_id: Uuid) -> Result<Option<ArtisanProfile>, Error>;

    async fn get_artisan_profile_by_id(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<ArtisanProfile>, Error>;

    #[allow(clippy::too_many_arguments)]
    async fn update_artisan_profile(
        &self,
        user_id: Uuid,
        bio: Option<String>,
        location: Option<String>,
        state: Option<String>,
        years_of_experience: i32,
        hourly_rate: Option<BigDecimal>,
        skills: Option<String>,
        availability_status: AvailabilityStatus,
    ) -> Result<ArtisanProfile, Error>;

    async fn list_artisans(
        &self,
        state: Option<&str>,
        skill: Option<&str>,
        verified_only: bool,
        page: u32,
        limit: usize,
    ) -> Result<Vec<ArtisanProfile>, Error>;

    async fn get_employer_profile(&self, user_id: Uuid)
        -> Result<Option<EmployerProfile>, Error>;

    async fn get_employer_profile_by_id(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<EmployerProfile>, Error>;

    #[allow(clippy::too_many_arguments)]
    async fn update_employer_profile(
        &self,
        user_id: Uuid,
        company_name: Option<String>,
        company_type: Option<String>,
        company_phone: Option<String>,
        company_website: Option<String>,
        company_address: Option<String>,
        company_description: Option<String>,
    ) -> Result<EmployerProfile, Error>;
}

#[async_trait]
impl ProfileExt for DBClient {
    async fn get_artisan_profile(&self, user_id: Uuid) -> Result<Option<ArtisanProfile>, Error> {
        sqlx::query_as::<_, ArtisanProfile>(&format!(
            "SELECT {ARTISAN_COLUMNS} FROM artisan_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_artisan_profile_by_id(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<ArtisanProfile>, Error> {
        sqlx::query_as::<_, ArtisanProfile>(&format!(
            "SELECT {ARTISAN_COLUMNS} FROM artisan_profiles WHERE id = $1"
        ))
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_artisan_profile(
        &self,
        user_id: Uuid,
        bio: Option<String>,
        location: Option<String>,
        state: Option<String>,
        years_of_experience: i32,
        hourly_rate: Option<BigDecimal>,
        skills: Option<String>,
        availability_status: AvailabilityStatus,
    ) -> Result<ArtisanProfile, Error> {
        sqlx::query_as::<_, ArtisanProfile>(&format!(
            r#"
            UPDATE artisan_profiles
            SET bio = $2,
                location = $3,
                state = $4,
                years_of_experience = $5,
                hourly_rate = $6,
                skills = $7,
                availability_status = $8,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {ARTISAN_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(bio)
        .bind(location)
        .bind(state)
        .bind(years_of_experience)
        .bind(hourly_rate)
        .bind(skills)
        .bind(availability_status)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_artisans(
        &self,
        state: Option<&str>,
        skill: Option<&str>,
        verified_only: bool,
        page: u32,
        limit: usize,
    ) -> Result<Vec<ArtisanProfile>, Error> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        let mut builder = QueryBuilder::new(format!(
            "SELECT {ARTISAN_COLUMNS} FROM artisan_profiles WHERE TRUE"
        ));
        if verified_only {
            builder.push(" AND verification_status = 'verified'::profile_verification_status");
        }
        if let Some(state) = state {
            builder.push(" AND state = ").push_bind(state.to_string());
        }
        if let Some(skill) = skill {
            builder
                .push(" AND skills ILIKE ")
                .push_bind(format!("%{}%", skill));
        }
        builder
            .push(" ORDER BY rating DESC, created_at DESC LIMIT ")
            .push_bind(limit as i64)
            .push(" OFFSET ")
            .push_bind(offset);

        builder
            .build_query_as::<ArtisanProfile>()
            .fetch_all(&self.pool)
            .await
    }

    async fn get_employer_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<EmployerProfile>, Error> {
        sqlx::query_as::<_, EmployerProfile>(&format!(
            "SELECT {EMPLOYER_COLUMNS} FROM employer_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_employer_profile_by_id(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<EmployerProfile>, Error> {
        sqlx::query_as::<_, EmployerProfile>(&format!(
            "SELECT {EMPLOYER_COLUMNS} FROM employer_profiles WHERE id = $1"
        ))
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_employer_profile(
        &self,
        user_id: Uuid,
        company_name: Option<String>,
        company_type: Option<String>,
        company_phone: Option<String>,
        company_website: Option<String>,
        company_address: Option<String>,
        company_description: Option<String>,
    ) -> Result<EmployerProfile, Error> {
        sqlx::query_as::<_, EmployerProfile>(&format!(
            r#"
            UPDATE employer_profiles
            SET company_name = $2,
                company_type = $3,
                company_phone = $4,
                company_website = $5,
                company_address = $6,
                company_description = $7,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {EMPLOYER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(company_name)
        .bind(company_type)
        .bind(company_phone)
        .bind(company_website)
        .bind(company_address)
        .bind(company_description)
        .fetch_one(&self.pool)
        .await
    }
}

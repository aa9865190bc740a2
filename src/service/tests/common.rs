// Shared in-memory store so the workflow services can be exercised without
// a running database. Implements the same storage traits the services use
// in production, including the status-guarded transition semantics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::db::{
    jobdb::JobExt, notificationdb::NotificationExt, profiledb::ProfileExt,
    verificationdb::VerificationExt,
};
use crate::models::{
    jobmodel::{ApplicationStatus, ExperienceLevel, Job, JobApplication, JobStatus},
    notificationmodel::{Notification, NotificationType},
    profilemodel::{
        ArtisanProfile, AvailabilityStatus, EmployerProfile, ProfileVerificationStatus,
    },
    usermodel::UserRole,
    verificationmodels::{VerificationLog, VerificationLogStatus, VerificationType},
};

fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn artisan_profile(user_id: Uuid) -> ArtisanProfile {
    ArtisanProfile {
        id: Uuid::new_v4(),
        user_id,
        bio: None,
        location: Some("Ikeja".to_string()),
        state: Some("Lagos".to_string()),
        years_of_experience: 4,
        hourly_rate: Some(BigDecimal::from(2500)),
        skills: Some("plumbing,tiling".to_string()),
        availability_status: AvailabilityStatus::Available,
        verification_status: ProfileVerificationStatus::Pending,
        rating: 0.0,
        total_reviews: 0,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn employer_profile(user_id: Uuid) -> EmployerProfile {
    EmployerProfile {
        id: Uuid::new_v4(),
        user_id,
        company_name: Some("Bluegate Construction".to_string()),
        company_type: Some("construction".to_string()),
        company_phone: None,
        company_website: None,
        company_address: None,
        company_description: None,
        verification_status: ProfileVerificationStatus::Pending,
        rating: 0.0,
        total_reviews: 0,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn job(employer_id: Uuid) -> Job {
    Job {
        id: Uuid::new_v4(),
        employer_id,
        title: "Bathroom renovation".to_string(),
        description: "Full re-tiling and plumbing overhaul of a guest bathroom".to_string(),
        category: "plumbing".to_string(),
        location: "Ikeja".to_string(),
        state: "Lagos".to_string(),
        budget_min: BigDecimal::from(50_000),
        budget_max: BigDecimal::from(120_000),
        duration: Some("2 weeks".to_string()),
        experience_level: ExperienceLevel::Intermediate,
        required_skills: Some("plumbing,tiling".to_string()),
        status: JobStatus::Open,
        deadline: None,
        posted_date: now(),
        updated_at: now(),
    }
}

pub fn job_application(job_id: Uuid, artisan_id: Uuid) -> JobApplication {
    JobApplication {
        id: Uuid::new_v4(),
        job_id,
        artisan_id,
        cover_letter: "I have handled several similar renovations.".to_string(),
        proposed_rate: Some(BigDecimal::from(3000)),
        status: ApplicationStatus::Pending,
        applied_date: now(),
    }
}

#[derive(Default)]
struct State {
    users: HashMap<Uuid, UserRole>,
    profile_verified: HashMap<Uuid, bool>,
    artisan_profiles: HashMap<Uuid, ArtisanProfile>,
    employer_profiles: HashMap<Uuid, EmployerProfile>,
    logs: Vec<VerificationLog>,
    jobs: HashMap<Uuid, Job>,
    applications: HashMap<Uuid, JobApplication>,
    notifications: Vec<Notification>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    fail_notifications: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_user(&self, role: UserRole) -> Uuid {
        let id = Uuid::new_v4();
        let mut state = self.state.lock().unwrap();
        state.users.insert(id, role);
        state.profile_verified.insert(id, false);
        id
    }

    pub fn seed_artisan(&self) -> (Uuid, ArtisanProfile) {
        let user_id = self.seed_user(UserRole::Artisan);
        let profile = artisan_profile(user_id);
        self.state
            .lock()
            .unwrap()
            .artisan_profiles
            .insert(profile.id, profile.clone());
        (user_id, profile)
    }

    pub fn seed_employer(&self) -> (Uuid, EmployerProfile) {
        let user_id = self.seed_user(UserRole::Employer);
        let profile = employer_profile(user_id);
        self.state
            .lock()
            .unwrap()
            .employer_profiles
            .insert(profile.id, profile.clone());
        (user_id, profile)
    }

    pub fn seed_pending_log(&self, user_id: Uuid) -> VerificationLog {
        let log = VerificationLog {
            id: Uuid::new_v4(),
            user_id,
            admin_id: None,
            verification_type: VerificationType::Profile,
            status: VerificationLogStatus::Pending,
            comments: None,
            created_at: now(),
            updated_at: now(),
        };
        self.state.lock().unwrap().logs.push(log.clone());
        log
    }

    pub fn seed_job(&self, employer_id: Uuid, status: JobStatus) -> Job {
        let mut posted = job(employer_id);
        posted.status = status;
        self.state
            .lock()
            .unwrap()
            .jobs
            .insert(posted.id, posted.clone());
        posted
    }

    pub fn set_fail_notifications(&self, fail: bool) {
        self.fail_notifications.store(fail, Ordering::SeqCst);
    }

    pub fn notifications_for(&self, user_id: Uuid) -> Vec<Notification> {
        self.state
            .lock()
            .unwrap()
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn log_by_id(&self, log_id: Uuid) -> Option<VerificationLog> {
        self.state
            .lock()
            .unwrap()
            .logs
            .iter()
            .find(|l| l.id == log_id)
            .cloned()
    }

    pub fn artisan_by_id(&self, profile_id: Uuid) -> Option<ArtisanProfile> {
        self.state
            .lock()
            .unwrap()
            .artisan_profiles
            .get(&profile_id)
            .cloned()
    }

    pub fn employer_by_id(&self, profile_id: Uuid) -> Option<EmployerProfile> {
        self.state
            .lock()
            .unwrap()
            .employer_profiles
            .get(&profile_id)
            .cloned()
    }

    pub fn application_by_id(&self, application_id: Uuid) -> Option<JobApplication> {
        self.state
            .lock()
            .unwrap()
            .applications
            .get(&application_id)
            .cloned()
    }

    pub fn application_count(&self) -> usize {
        self.state.lock().unwrap().applications.len()
    }

    pub fn user_profile_verified(&self, user_id: Uuid) -> bool {
        self.state
            .lock()
            .unwrap()
            .profile_verified
            .get(&user_id)
            .copied()
            .unwrap_or(false)
    }
}

#[async_trait]
impl VerificationExt for MemoryStore {
    async fn create_verification_log(
        &self,
        user_id: Uuid,
        verification_type: VerificationType,
    ) -> Result<VerificationLog, sqlx::Error> {
        let log = VerificationLog {
            id: Uuid::new_v4(),
            user_id,
            admin_id: None,
            verification_type,
            status: VerificationLogStatus::Pending,
            comments: None,
            created_at: now(),
            updated_at: now(),
        };
        self.state.lock().unwrap().logs.push(log.clone());
        Ok(log)
    }

    async fn get_verification_log(
        &self,
        log_id: Uuid,
    ) -> Result<Option<VerificationLog>, sqlx::Error> {
        Ok(self.log_by_id(log_id))
    }

    async fn latest_verification_log(
        &self,
        user_id: Uuid,
    ) -> Result<Option<VerificationLog>, sqlx::Error> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .logs
            .iter()
            .rev()
            .find(|l| l.user_id == user_id)
            .cloned())
    }

    async fn get_pending_verifications(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<VerificationLog>, sqlx::Error> {
        let offset = (page.max(1) as usize - 1) * limit;
        Ok(self
            .state
            .lock()
            .unwrap()
            .logs
            .iter()
            .filter(|l| l.status == VerificationLogStatus::Pending)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_pending_verifications(&self) -> Result<i64, sqlx::Error> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .logs
            .iter()
            .filter(|l| l.status == VerificationLogStatus::Pending)
            .count() as i64)
    }

    async fn get_verification_history(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VerificationLog>, sqlx::Error> {
        let mut history: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .logs
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        history.reverse();
        Ok(history)
    }

    async fn apply_verification_decision(
        &self,
        log_id: Uuid,
        admin_id: Uuid,
        decision: VerificationLogStatus,
        comments: Option<String>,
    ) -> Result<Option<VerificationLog>, sqlx::Error> {
        let mut state = self.state.lock().unwrap();

        // Everything is validated before any write so a failure leaves the
        // store untouched, matching the transactional implementation.
        let user_id = match state
            .logs
            .iter()
            .find(|l| l.id == log_id && l.status == VerificationLogStatus::Pending)
        {
            Some(log) => log.user_id,
            None => return Ok(None),
        };

        let role = state
            .users
            .get(&user_id)
            .copied()
            .ok_or(sqlx::Error::RowNotFound)?;

        let profile_status = match decision {
            VerificationLogStatus::Approved => ProfileVerificationStatus::Verified,
            _ => ProfileVerificationStatus::Rejected,
        };

        match role {
            UserRole::Artisan => {
                let profile = state
                    .artisan_profiles
                    .values_mut()
                    .find(|p| p.user_id == user_id)
                    .ok_or(sqlx::Error::RowNotFound)?;
                profile.verification_status = profile_status;
                profile.updated_at = now();
            }
            UserRole::Employer => {
                let profile = state
                    .employer_profiles
                    .values_mut()
                    .find(|p| p.user_id == user_id)
                    .ok_or(sqlx::Error::RowNotFound)?;
                profile.verification_status = profile_status;
                profile.updated_at = now();
            }
            UserRole::Admin => return Err(sqlx::Error::RowNotFound),
        }

        if decision == VerificationLogStatus::Approved {
            state.profile_verified.insert(user_id, true);
        }

        let log = state
            .logs
            .iter_mut()
            .find(|l| l.id == log_id)
            .expect("log existed above");
        log.status = decision;
        log.admin_id = Some(admin_id);
        log.comments = comments;
        log.updated_at = now();

        Ok(Some(log.clone()))
    }
}

#[async_trait]
impl NotificationExt for MemoryStore {
    async fn create_notification(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        message: String,
        related_id: Option<Uuid>,
    ) -> Result<Notification, sqlx::Error> {
        if self.fail_notifications.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }

        let notification = Notification {
            id: Uuid::new_v4(),
            user_id,
            notification_type,
            title,
            message,
            related_id,
            is_read: false,
            created_at: now(),
        };
        self.state
            .lock()
            .unwrap()
            .notifications
            .push(notification.clone());
        Ok(notification)
    }

    async fn get_notifications(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let offset = (page.max(1) as usize - 1) * limit;
        Ok(self
            .notifications_for(user_id)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count_notifications(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        Ok(self.notifications_for(user_id).len() as i64)
    }

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        Ok(self
            .notifications_for(user_id)
            .iter()
            .filter(|n| !n.is_read)
            .count() as i64)
    }

    async fn mark_notifications_read(
        &self,
        user_id: Uuid,
        notification_ids: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        let mut updated = 0;
        for notification in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && notification_ids.contains(&n.id) && !n.is_read)
        {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        let mut updated = 0;
        for notification in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait]
impl ProfileExt for MemoryStore {
    async fn get_artisan_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ArtisanProfile>, sqlx::Error> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .artisan_profiles
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn get_artisan_profile_by_id(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<ArtisanProfile>, sqlx::Error> {
        Ok(self.artisan_by_id(profile_id))
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
    ) -> Result<ArtisanProfile, sqlx::Error> {
        let mut guard = self.state.lock().unwrap();
        let profile = guard
            .artisan_profiles
            .values_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(sqlx::Error::RowNotFound)?;
        profile.bio = bio;
        profile.location = location;
        profile.state = state;
        profile.years_of_experience = years_of_experience;
        profile.hourly_rate = hourly_rate;
        profile.skills = skills;
        profile.availability_status = availability_status;
        profile.updated_at = now();
        Ok(profile.clone())
    }

    async fn list_artisans(
        &self,
        state: Option<&str>,
        skill: Option<&str>,
        verified_only: bool,
        page: u32,
        limit: usize,
    ) -> Result<Vec<ArtisanProfile>, sqlx::Error> {
        let offset = (page.max(1) as usize - 1) * limit;
        Ok(self
            .state
            .lock()
            .unwrap()
            .artisan_profiles
            .values()
            .filter(|p| {
                (!verified_only
                    || p.verification_status == ProfileVerificationStatus::Verified)
                    && state.map_or(true, |s| p.state.as_deref() == Some(s))
                    && skill.map_or(true, |s| {
                        p.skills
                            .as_deref()
                            .map(|sk| sk.contains(s))
                            .unwrap_or(false)
                    })
            })
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_employer_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<EmployerProfile>, sqlx::Error> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .employer_profiles
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn get_employer_profile_by_id(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<EmployerProfile>, sqlx::Error> {
        Ok(self.employer_by_id(profile_id))
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
    ) -> Result<EmployerProfile, sqlx::Error> {
        let mut guard = self.state.lock().unwrap();
        let profile = guard
            .employer_profiles
            .values_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(sqlx::Error::RowNotFound)?;
        profile.company_name = company_name;
        profile.company_type = company_type;
        profile.company_phone = company_phone;
        profile.company_website = company_website;
        profile.company_address = company_address;
        profile.company_description = company_description;
        profile.updated_at = now();
        Ok(profile.clone())
    }
}

#[async_trait]
impl JobExt for MemoryStore {
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
    ) -> Result<Job, sqlx::Error> {
        let job = Job {
            id: Uuid::new_v4(),
            employer_id,
            title,
            description,
            category,
            location,
            state,
            budget_min,
            budget_max,
            duration,
            experience_level,
            required_skills,
            status: JobStatus::Open,
            deadline,
            posted_date: now(),
            updated_at: now(),
        };
        self.state.lock().unwrap().jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error> {
        Ok(self.state.lock().unwrap().jobs.get(&job_id).cloned())
    }

    async fn list_open_jobs(
        &self,
        category: Option<&str>,
        state: Option<&str>,
        search: Option<&str>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Job>, sqlx::Error> {
        let offset = (page.max(1) as usize - 1) * limit;
        Ok(self
            .state
            .lock()
            .unwrap()
            .jobs
            .values()
            .filter(|j| {
                j.status == JobStatus::Open
                    && category.map_or(true, |c| j.category == c)
                    && state.map_or(true, |s| j.state == s)
                    && search.map_or(true, |q| {
                        j.title.contains(q) || j.description.contains(q)
                    })
            })
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_open_jobs(
        &self,
        category: Option<&str>,
        state: Option<&str>,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        Ok(self
            .list_open_jobs(category, state, search, 1, usize::MAX)
            .await?
            .len() as i64)
    }

    async fn get_employer_jobs(&self, employer_id: Uuid) -> Result<Vec<Job>, sqlx::Error> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .jobs
            .values()
            .filter(|j| j.employer_id == employer_id)
            .cloned()
            .collect())
    }

    async fn get_jobs(&self, page: u32, limit: usize) -> Result<Vec<Job>, sqlx::Error> {
        let offset = (page.max(1) as usize - 1) * limit;
        Ok(self
            .state
            .lock()
            .unwrap()
            .jobs
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_job_status(
        &self,
        job_id: Uuid,
        employer_id: Uuid,
        status: JobStatus,
    ) -> Result<Option<Job>, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        match state
            .jobs
            .get_mut(&job_id)
            .filter(|j| j.employer_id == employer_id)
        {
            Some(job) => {
                job.status = status;
                job.updated_at = now();
                Ok(Some(job.clone()))
            }
            None => Ok(None),
        }
    }

    async fn create_job_application(
        &self,
        job_id: Uuid,
        artisan_id: Uuid,
        cover_letter: String,
        proposed_rate: Option<BigDecimal>,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        let mut state = self.state.lock().unwrap();

        // Mirrors the unique index: the insert silently yields nothing on
        // a duplicate (job_id, artisan_id) pair.
        let duplicate = state
            .applications
            .values()
            .any(|a| a.job_id == job_id && a.artisan_id == artisan_id);
        if duplicate {
            return Ok(None);
        }

        let application = JobApplication {
            id: Uuid::new_v4(),
            job_id,
            artisan_id,
            cover_letter,
            proposed_rate,
            status: ApplicationStatus::Pending,
            applied_date: now(),
        };
        state
            .applications
            .insert(application.id, application.clone());
        Ok(Some(application))
    }

    async fn get_application(
        &self,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        Ok(self.application_by_id(application_id))
    }

    async fn get_job_applications(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobApplication>, sqlx::Error> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn get_artisan_applications(
        &self,
        artisan_id: Uuid,
    ) -> Result<Vec<JobApplication>, sqlx::Error> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .applications
            .values()
            .filter(|a| a.artisan_id == artisan_id)
            .cloned()
            .collect())
    }

    async fn list_applications(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<JobApplication>, sqlx::Error> {
        let offset = (page.max(1) as usize - 1) * limit;
        Ok(self
            .state
            .lock()
            .unwrap()
            .applications
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_application_status(
        &self,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        match state
            .applications
            .get_mut(&application_id)
            .filter(|a| a.status == ApplicationStatus::Pending)
        {
            Some(application) => {
                application.status = status;
                Ok(Some(application.clone()))
            }
            None => Ok(None),
        }
    }

    async fn withdraw_application(
        &self,
        application_id: Uuid,
        artisan_id: Uuid,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        match state.applications.get_mut(&application_id).filter(|a| {
            a.artisan_id == artisan_id && a.status == ApplicationStatus::Pending
        }) {
            Some(application) => {
                application.status = ApplicationStatus::Withdrawn;
                Ok(Some(application.clone()))
            }
            None => Ok(None),
        }
    }
}

// service/policy.rs
//
// Access decisions for workflow transitions. Every check takes the acting
// user explicitly; nothing here reads ambient request state.

use uuid::Uuid;

use crate::models::{
    jobmodel::{ApplicationStatus, Job, JobApplication},
    profilemodel::{ArtisanProfile, EmployerProfile},
    usermodel::{User, UserRole},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Actor { id, role }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor {
            id: user.id,
            role: user.role,
        }
    }
}

/// Only admins review verification logs.
pub fn can_review(actor: &Actor) -> bool {
    actor.role == UserRole::Admin
}

/// The actor must own the employer profile that owns the application's job.
pub fn can_decide_application(
    actor: &Actor,
    employer_profile: &EmployerProfile,
    job: &Job,
) -> bool {
    actor.role == UserRole::Employer
        && employer_profile.user_id == actor.id
        && job.employer_id == employer_profile.id
}

/// The actor must own the artisan profile on the application, and the
/// application must still be pending.
pub fn can_withdraw(
    actor: &Actor,
    artisan_profile: &ArtisanProfile,
    application: &JobApplication,
) -> bool {
    actor.role == UserRole::Artisan
        && artisan_profile.user_id == actor.id
        && application.artisan_id == artisan_profile.id
        && application.status == ApplicationStatus::Pending
}

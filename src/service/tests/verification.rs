use std::sync::Arc;

use uuid::Uuid;

use super::common::MemoryStore;
use crate::models::{
    notificationmodel::NotificationType,
    profilemodel::ProfileVerificationStatus,
    usermodel::UserRole,
    verificationmodels::VerificationLogStatus,
};
use crate::service::{
    error::ServiceError,
    policy::Actor,
    verification_workflow::{ReviewPolicy, VerificationWorkflow},
};

fn workflow(store: &Arc<MemoryStore>) -> VerificationWorkflow<MemoryStore> {
    VerificationWorkflow::new(store.clone(), ReviewPolicy::default())
}

fn strict_workflow(store: &Arc<MemoryStore>) -> VerificationWorkflow<MemoryStore> {
    VerificationWorkflow::new(
        store.clone(),
        ReviewPolicy {
            require_rejection_comments: true,
        },
    )
}

fn admin(store: &MemoryStore) -> Actor {
    Actor::new(store.seed_user(UserRole::Admin), UserRole::Admin)
}

#[tokio::test]
async fn approving_a_pending_log_updates_log_profile_and_user() {
    let store = MemoryStore::new();
    let (user_id, profile) = store.seed_artisan();
    let log = store.seed_pending_log(user_id);
    let reviewer = admin(&store);

    let approved = workflow(&store)
        .approve(&reviewer, log.id, Some("Documents check out".to_string()))
        .await
        .expect("approval succeeds");

    assert_eq!(approved.status, VerificationLogStatus::Approved);
    assert_eq!(approved.admin_id, Some(reviewer.id));
    assert_eq!(approved.comments.as_deref(), Some("Documents check out"));

    let profile = store.artisan_by_id(profile.id).unwrap();
    assert_eq!(
        profile.verification_status,
        ProfileVerificationStatus::Verified
    );
    assert!(store.user_profile_verified(user_id));

    let notifications = store.notifications_for(user_id);
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].notification_type,
        NotificationType::ProfileVerified
    );
}

#[tokio::test]
async fn approving_an_employer_log_updates_the_employer_profile() {
    let store = MemoryStore::new();
    let (user_id, profile) = store.seed_employer();
    let log = store.seed_pending_log(user_id);

    workflow(&store)
        .approve(&admin(&store), log.id, None)
        .await
        .expect("approval succeeds");

    let profile = store.employer_by_id(profile.id).unwrap();
    assert_eq!(
        profile.verification_status,
        ProfileVerificationStatus::Verified
    );
    assert!(store.user_profile_verified(user_id));
}

#[tokio::test]
async fn non_admins_cannot_review() {
    let store = MemoryStore::new();
    let (user_id, _) = store.seed_artisan();
    let log = store.seed_pending_log(user_id);

    let intruder = Actor::new(user_id, UserRole::Artisan);
    let result = workflow(&store).approve(&intruder, log.id, None).await;

    assert!(matches!(result, Err(ServiceError::UnauthorizedReview(_))));
    assert_eq!(
        store.log_by_id(log.id).unwrap().status,
        VerificationLogStatus::Pending
    );
    assert!(store.notifications_for(user_id).is_empty());
}

#[tokio::test]
async fn reviewing_a_missing_log_is_not_found() {
    let store = MemoryStore::new();
    let result = workflow(&store)
        .approve(&admin(&store), Uuid::new_v4(), None)
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::VerificationLogNotFound(_))
    ));
}

#[tokio::test]
async fn a_second_approval_fails_and_fires_no_second_notification() {
    let store = MemoryStore::new();
    let (user_id, _) = store.seed_artisan();
    let log = store.seed_pending_log(user_id);
    let wf = workflow(&store);

    wf.approve(&admin(&store), log.id, None)
        .await
        .expect("first approval succeeds");

    let second = wf.approve(&admin(&store), log.id, None).await;
    assert!(matches!(
        second,
        Err(ServiceError::InvalidVerificationStatus(
            _,
            VerificationLogStatus::Approved
        ))
    ));

    assert_eq!(store.notifications_for(user_id).len(), 1);
}

#[tokio::test]
async fn rejection_marks_profile_but_leaves_user_flag_unset() {
    let store = MemoryStore::new();
    let (user_id, profile) = store.seed_artisan();
    let log = store.seed_pending_log(user_id);

    let rejected = workflow(&store)
        .reject(
            &admin(&store),
            log.id,
            Some("Trade license has expired".to_string()),
        )
        .await
        .expect("rejection succeeds");

    assert_eq!(rejected.status, VerificationLogStatus::Rejected);

    let profile = store.artisan_by_id(profile.id).unwrap();
    assert_eq!(
        profile.verification_status,
        ProfileVerificationStatus::Rejected
    );
    assert!(!store.user_profile_verified(user_id));

    let notifications = store.notifications_for(user_id);
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].notification_type,
        NotificationType::ProfileRejected
    );
    assert!(notifications[0].message.contains("Trade license has expired"));
}

#[tokio::test]
async fn rejection_comments_policy_is_enforced_when_enabled() {
    let store = MemoryStore::new();
    let (user_id, _) = store.seed_artisan();
    let log = store.seed_pending_log(user_id);
    let reviewer = admin(&store);

    let result = strict_workflow(&store)
        .reject(&reviewer, log.id, Some("   ".to_string()))
        .await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));
    assert_eq!(
        store.log_by_id(log.id).unwrap().status,
        VerificationLogStatus::Pending
    );

    // The default policy accepts a bare rejection.
    workflow(&store)
        .reject(&reviewer, log.id, None)
        .await
        .expect("bare rejection succeeds under the default policy");
}

#[tokio::test]
async fn approval_commits_even_when_notification_dispatch_fails() {
    let store = MemoryStore::new();
    let (user_id, _) = store.seed_artisan();
    let log = store.seed_pending_log(user_id);

    store.set_fail_notifications(true);

    let approved = workflow(&store)
        .approve(&admin(&store), log.id, None)
        .await
        .expect("approval survives a dispatch failure");

    assert_eq!(approved.status, VerificationLogStatus::Approved);
    assert!(store.user_profile_verified(user_id));
    assert!(store.notifications_for(user_id).is_empty());
}

#[tokio::test]
async fn resubmission_opens_a_new_cycle_only_after_rejection() {
    let store = MemoryStore::new();
    let (user_id, _) = store.seed_artisan();
    let log = store.seed_pending_log(user_id);
    let wf = workflow(&store);
    let applicant = Actor::new(user_id, UserRole::Artisan);

    // Blocked while the first cycle is still pending.
    let blocked = wf.resubmit(&applicant).await;
    assert!(matches!(
        blocked,
        Err(ServiceError::InvalidVerificationStatus(
            _,
            VerificationLogStatus::Pending
        ))
    ));

    wf.reject(&admin(&store), log.id, None)
        .await
        .expect("rejection succeeds");

    let fresh = wf.resubmit(&applicant).await.expect("resubmission succeeds");
    assert_eq!(fresh.status, VerificationLogStatus::Pending);
    assert_ne!(fresh.id, log.id);

    // An approved user has nothing to resubmit.
    wf.approve(&admin(&store), fresh.id, None)
        .await
        .expect("approval succeeds");
    let done = wf.resubmit(&applicant).await;
    assert!(matches!(
        done,
        Err(ServiceError::InvalidVerificationStatus(
            _,
            VerificationLogStatus::Approved
        ))
    ));
}

//! Integration tests for the repository layer.
//!
//! Exercises every repository against a real database:
//! - Profile creation and the unique email constraint
//! - Catalog CRUD and the RESTRICT foreign key from applications
//! - Application submission, owner scoping, and conditional transitions
//! - Notification read state
//! - Session revocation

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use egram_core::application_status::ApplicationStatus;
use egram_core::roles::Role;
use egram_db::models::application::{CreateApplication, StatusTransition};
use egram_db::models::notification::CreateNotification;
use egram_db::models::profile::{CreateProfile, UpdateProfile};
use egram_db::models::service::{CreateService, UpdateService};
use egram_db::models::session::CreateSession;
use egram_db::repositories::{
    ApplicationRepo, NotificationRepo, ProfileRepo, ServiceRepo, SessionRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn profile(pool: &PgPool, email: &str, role: Role) -> i64 {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            name: format!("User {email}"),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
        },
    )
    .await
    .unwrap()
    .id
}

async fn service(pool: &PgPool, name: &str, docs: &[&str]) -> i64 {
    ServiceRepo::create(
        pool,
        &CreateService {
            name: name.to_string(),
            description: format!("{name} description"),
            documents_required: docs.iter().map(|d| d.to_string()).collect(),
            fee: Some(25.0),
            processing_time: Some("3 days".to_string()),
        },
    )
    .await
    .unwrap()
    .id
}

async fn application(pool: &PgPool, user_id: i64, service_id: i64) -> i64 {
    ApplicationRepo::create(
        pool,
        &CreateApplication {
            user_id,
            service_id,
            notes: None,
            documents: vec!["ID Proof".to_string()],
        },
    )
    .await
    .unwrap()
    .id
}

fn constraint_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.constraint().map(str::to_string),
        _ => None,
    }
}

fn code_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| c.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_create_and_find(pool: PgPool) {
    let id = profile(&pool, "asha@example.com", Role::Citizen).await;

    let found = ProfileRepo::find_by_email(&pool, "asha@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.role(), Role::Citizen);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    profile(&pool, "dup@example.com", Role::Citizen).await;

    let err = ProfileRepo::create(
        &pool,
        &CreateProfile {
            name: "Other".to_string(),
            email: "dup@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Citizen,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_profiles_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_check_rejects_unknown_role(pool: PgPool) {
    let err = sqlx::query(
        "INSERT INTO profiles (name, email, password_hash, role) VALUES ('X', 'x@y.z', 'h', 'root')",
    )
    .execute(&pool)
    .await
    .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("ck_profiles_role"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_update_applies_only_given_fields(pool: PgPool) {
    let id = profile(&pool, "ravi@example.com", Role::Citizen).await;

    let updated = ProfileRepo::update(
        &pool,
        id,
        &UpdateProfile {
            phone: Some("98765 43210".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.phone.as_deref(), Some("98765 43210"));
    assert_eq!(updated.name, "User ravi@example.com");

    let missing = ProfileRepo::update(&pool, 999_999, &UpdateProfile::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_crud(pool: PgPool) {
    let id = service(&pool, "Ration Card", &["ID Proof", "Address Proof"]).await;

    let updated = ServiceRepo::update(
        &pool,
        id,
        &UpdateService {
            fee: Some(0.0),
            documents_required: Some(vec!["ID Proof".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.fee, Some(0.0));
    assert_eq!(updated.documents_required, vec!["ID Proof"]);
    assert_eq!(updated.name, "Ration Card");

    assert!(ServiceRepo::delete(&pool, id).await.unwrap());
    assert!(ServiceRepo::find_by_id(&pool, id).await.unwrap().is_none());
    assert!(!ServiceRepo::delete(&pool, id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_services_listed_by_name(pool: PgPool) {
    service(&pool, "Aadhaar Update", &[]).await;
    let names: Vec<String> = ServiceRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names.first().map(String::as_str), Some("Aadhaar Update"));
    assert_eq!(names.len(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_fee_violates_check(pool: PgPool) {
    let err = sqlx::query("INSERT INTO services (name, fee) VALUES ('Bad', -1)")
        .execute(&pool)
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("ck_services_fee"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_service_with_applications_is_restricted(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let svc = service(&pool, "Water Connection", &["ID Proof"]).await;
    application(&pool, user, svc).await;

    let err = ServiceRepo::delete(&pool, svc).await.unwrap_err();
    assert_eq!(code_of(&err).as_deref(), Some("23503"));
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_application_is_pending(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let svc = service(&pool, "Water Connection", &["ID Proof"]).await;

    let app = ApplicationRepo::create(
        &pool,
        &CreateApplication {
            user_id: user,
            service_id: svc,
            notes: Some("urgent".to_string()),
            documents: vec!["ID Proof".to_string()],
        },
    )
    .await
    .unwrap();
    assert_eq!(app.status(), ApplicationStatus::Pending);
    assert_eq!(app.processed_by, None);
    assert_eq!(app.documents, vec!["ID Proof"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_application_with_missing_service_violates_fk(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let err = ApplicationRepo::create(
        &pool,
        &CreateApplication {
            user_id: user,
            service_id: 999_999,
            notes: None,
            documents: vec![],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(code_of(&err).as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_applications_are_scoped_to_owner(pool: PgPool) {
    let owner = profile(&pool, "owner@example.com", Role::Citizen).await;
    let other = profile(&pool, "other@example.com", Role::Citizen).await;
    let svc = service(&pool, "Water Connection", &[]).await;
    let app = application(&pool, owner, svc).await;

    let mine = ApplicationRepo::find_for_user(&pool, app, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mine.service_name, "Water Connection");

    assert!(ApplicationRepo::find_for_user(&pool, app, other)
        .await
        .unwrap()
        .is_none());
    assert!(ApplicationRepo::list_for_user(&pool, other, None)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_user_is_newest_first_and_limited(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let svc = service(&pool, "Water Connection", &[]).await;
    let mut ids = Vec::new();
    for _ in 0..7 {
        ids.push(application(&pool, user, svc).await);
    }

    let recent = ApplicationRepo::list_for_user(&pool, user, Some(5))
        .await
        .unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].id, ids[6]);

    let all = ApplicationRepo::list_for_user(&pool, user, None).await.unwrap();
    assert_eq!(all.len(), 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transition_updates_status_and_processor(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let staff = profile(&pool, "staff@example.com", Role::Staff).await;
    let svc = service(&pool, "Water Connection", &[]).await;
    let app = application(&pool, user, svc).await;

    let updated = ApplicationRepo::transition(
        &pool,
        &StatusTransition {
            id: app,
            expected: ApplicationStatus::Pending,
            next: ApplicationStatus::InReview,
            notes: Some("checking documents".to_string()),
            processed_by: staff,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status(), ApplicationStatus::InReview);
    assert_eq!(updated.processed_by, Some(staff));
    assert_eq!(updated.notes.as_deref(), Some("checking documents"));

    // Notes are kept when none are given.
    let kept = ApplicationRepo::transition(
        &pool,
        &StatusTransition {
            id: app,
            expected: ApplicationStatus::InReview,
            next: ApplicationStatus::Approved,
            notes: None,
            processed_by: staff,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(kept.notes.as_deref(), Some("checking documents"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transition_from_stale_status_writes_nothing(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let staff = profile(&pool, "staff@example.com", Role::Staff).await;
    let svc = service(&pool, "Water Connection", &[]).await;
    let app = application(&pool, user, svc).await;

    let stale = ApplicationRepo::transition(
        &pool,
        &StatusTransition {
            id: app,
            expected: ApplicationStatus::Approved,
            next: ApplicationStatus::Completed,
            notes: None,
            processed_by: staff,
        },
    )
    .await
    .unwrap();
    assert!(stale.is_none());

    let row = ApplicationRepo::find_by_id(&pool, app).await.unwrap().unwrap();
    assert_eq!(row.status(), ApplicationStatus::Pending);
    assert_eq!(row.processed_by, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_listing_and_staff_activity(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let staff = profile(&pool, "staff@example.com", Role::Staff).await;
    let svc = service(&pool, "Water Connection", &[]).await;
    let untouched = application(&pool, user, svc).await;
    let processed = application(&pool, user, svc).await;

    ApplicationRepo::transition(
        &pool,
        &StatusTransition {
            id: processed,
            expected: ApplicationStatus::Pending,
            next: ApplicationStatus::Rejected,
            notes: None,
            processed_by: staff,
        },
    )
    .await
    .unwrap()
    .unwrap();

    let board = ApplicationRepo::list_for_review(&pool).await.unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].applicant_name, "User c@example.com");

    let review = ApplicationRepo::find_for_review(&pool, untouched)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(review.service_name, "Water Connection");

    let activity = ApplicationRepo::list_processed(&pool).await.unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].id, processed);
    assert_eq!(activity[0].staff_name, "User staff@example.com");

    assert_eq!(
        ApplicationRepo::count_with_status(&pool, ApplicationStatus::Pending)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        ApplicationRepo::count_with_status(&pool, ApplicationStatus::Rejected)
            .await
            .unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_profile_cascades_applications(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let svc = service(&pool, "Water Connection", &[]).await;
    let app = application(&pool, user, svc).await;

    sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(user)
        .execute(&pool)
        .await
        .unwrap();
    assert!(ApplicationRepo::find_by_id(&pool, app).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notification_read_state_is_owner_scoped(pool: PgPool) {
    let owner = profile(&pool, "owner@example.com", Role::Citizen).await;
    let other = profile(&pool, "other@example.com", Role::Citizen).await;

    let first = NotificationRepo::create(
        &pool,
        &CreateNotification {
            user_id: owner,
            title: "Application Submitted".to_string(),
            message: "one".to_string(),
        },
    )
    .await
    .unwrap();
    NotificationRepo::create(
        &pool,
        &CreateNotification {
            user_id: owner,
            title: "Application Approved".to_string(),
            message: "two".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(!first.is_read);
    assert_eq!(NotificationRepo::unread_count(&pool, owner).await.unwrap(), 2);

    assert!(!NotificationRepo::mark_read(&pool, first.id, other).await.unwrap());
    assert!(NotificationRepo::mark_read(&pool, first.id, owner).await.unwrap());
    assert_eq!(NotificationRepo::unread_count(&pool, owner).await.unwrap(), 1);

    let unread = NotificationRepo::list_for_user(&pool, owner, true, 50, 0)
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].message, "two");

    assert_eq!(NotificationRepo::mark_all_read(&pool, owner).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, owner).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoked_sessions_are_not_found(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user,
            refresh_token_hash: "abc".to_string(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .unwrap();

    let found = SessionRepo::find_active_by_token_hash(&pool, "abc")
        .await
        .unwrap();
    assert_matches!(found, Some(s) if s.id == session.id);

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user).await.unwrap(), 1);
    assert!(SessionRepo::find_active_by_token_hash(&pool, "abc")
        .await
        .unwrap()
        .is_none());
    assert_eq!(SessionRepo::purge_inactive(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_sessions_are_not_found(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user,
            refresh_token_hash: "old".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active_by_token_hash(&pool, "old")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rotate_consumes_the_old_session_once(pool: PgPool) {
    let user = profile(&pool, "c@example.com", Role::Citizen).await;
    let expires_at = Utc::now() + Duration::days(7);
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user,
            refresh_token_hash: "first".to_string(),
            expires_at,
        },
    )
    .await
    .unwrap();

    let rotated = SessionRepo::rotate(&pool, "first", "second", expires_at)
        .await
        .unwrap();
    assert_matches!(rotated, Some(s) if s.user_id == user && s.refresh_token_hash == "second");

    // The old hash is spent; retrying issues nothing.
    assert!(SessionRepo::rotate(&pool, "first", "third", expires_at)
        .await
        .unwrap()
        .is_none());
    assert!(SessionRepo::find_active_by_token_hash(&pool, "first")
        .await
        .unwrap()
        .is_none());
    assert!(SessionRepo::find_active_by_token_hash(&pool, "third")
        .await
        .unwrap()
        .is_none());

    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_sessions WHERE user_id = $1 AND is_revoked = false",
    )
    .bind(user)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(active, 1);
}

//! HTTP-level tests for the citizen dashboard and own profile.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, put_json_auth};
use egram_core::roles::Role;
use egram_db::models::application::CreateApplication;
use egram_db::models::notification::CreateNotification;
use egram_db::repositories::{ApplicationRepo, NotificationRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_shows_five_recent_items_and_unread_count(pool: PgPool) {
    let (user_id, token) =
        common::seed_user_with_token(&pool, "c@example.com", Role::Citizen).await;
    let service = common::seed_service(&pool, "Ration Card", &[]).await;
    for i in 0..7 {
        ApplicationRepo::create(
            &pool,
            &CreateApplication {
                user_id,
                service_id: service,
                notes: Some(format!("#{i}")),
                documents: vec![],
            },
        )
        .await
        .unwrap();
        NotificationRepo::create(
            &pool,
            &CreateNotification {
                user_id,
                title: format!("Notice {i}"),
                message: "m".into(),
            },
        )
        .await
        .unwrap();
    }
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/dashboard", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let recent = json["data"]["recent_applications"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["notes"], "#6");
    assert_eq!(json["data"]["recent_notifications"].as_array().unwrap().len(), 5);
    assert_eq!(json["data"]["unread_count"], 7);
    // Counts cover the fetched recent rows only.
    assert_eq!(json["data"]["counts"]["total"], 5);
    assert_eq!(json["data"]["counts"]["pending"], 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/dashboard").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_update_changes_only_given_fields(pool: PgPool) {
    let (_, token) = common::seed_user_with_token(&pool, "c@example.com", Role::Citizen).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "phone": " 9876543210 ", "address": "Ward 4" });
    let response = put_json_auth(app.clone(), "/api/v1/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app, "/api/v1/profile", &token).await).await;
    assert_eq!(json["data"]["phone"], "9876543210");
    assert_eq!(json["data"]["address"], "Ward 4");
    assert_eq!(json["data"]["name"], "citizen c@example.com");
    assert_eq!(json["data"]["email"], "c@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_profile_name_is_rejected(pool: PgPool) {
    let (_, token) = common::seed_user_with_token(&pool, "c@example.com", Role::Citizen).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "   " });
    let response = put_json_auth(app, "/api/v1/profile", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Name is required");
}

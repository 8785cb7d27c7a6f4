#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use egram_api::auth::jwt::{generate_access_token, JwtConfig};
use egram_api::auth::password::hash_password;
use egram_api::config::ServerConfig;
use egram_api::connectivity::ConnectivityMonitor;
use egram_api::router::build_app_router;
use egram_api::state::AppState;
use egram_core::connectivity::ConnectivityState;
use egram_core::roles::Role;
use egram_core::types::DbId;
use egram_db::models::profile::CreateProfile;
use egram_db::models::service::CreateService;
use egram_db::repositories::{ProfileRepo, ServiceRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        connectivity_probe_interval_secs: 30,
        query_cache_ttl_secs: 30,
        delete_confirm_ttl_secs: 120,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// The full router with the store marked reachable.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, ConnectivityState::Connected)
}

/// The full router with connectivity fixed at `connectivity`.
///
/// Clone the returned router to send several requests against the same
/// state (cache, delete confirmations).
pub fn build_test_app_with(pool: PgPool, connectivity: ConnectivityState) -> Router {
    let config = test_config();
    let state = AppState::new(
        pool,
        config.clone(),
        ConnectivityMonitor::with_state(connectivity),
    );
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a profile with [`TEST_PASSWORD`] and return its id.
pub async fn seed_user(pool: &PgPool, email: &str, role: Role) -> DbId {
    let input = CreateProfile {
        name: format!("{role} {email}"),
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role,
    };
    ProfileRepo::create(pool, &input)
        .await
        .expect("profile creation should succeed")
        .id
}

/// A valid access token for `user_id`, signed with the test secret.
pub fn token_for(user_id: DbId, role: Role) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

/// Seed a user and return `(id, token)`.
pub async fn seed_user_with_token(pool: &PgPool, email: &str, role: Role) -> (DbId, String) {
    let id = seed_user(pool, email, role).await;
    (id, token_for(id, role))
}

pub async fn seed_service(pool: &PgPool, name: &str, docs: &[&str]) -> DbId {
    ServiceRepo::create(
        pool,
        &CreateService {
            name: name.to_string(),
            description: format!("{name} description"),
            documents_required: docs.iter().map(|d| d.to_string()).collect(),
            fee: Some(20.0),
            processing_time: Some("5 days".to_string()),
        },
    )
    .await
    .expect("service creation should succeed")
    .id
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count query should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

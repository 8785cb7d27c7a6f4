pub mod admin;
pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod notifications;
pub mod profile;
pub mod review;
pub mod services;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/sign-up                                   register citizen (public)
/// /auth/sign-in                                   sign in (public)
/// /auth/refresh                                   refresh tokens (public)
/// /auth/sign-out                                  sign out (requires auth)
/// /auth/session                                   profile + connectivity
///
/// /profile                                        get, update (own)
///
/// /services                                       list (public), create (admin)
/// /services/{id}                                  get (public), update, delete (admin)
///
/// /applications                                   list, submit (own)
/// /applications/submission-form/{service_id}      empty upload slots
/// /applications/{id}                              detail + progress (own)
///
/// /review/applications                            review board (staff, admin)
/// /review/applications/{id}                       row + actions
/// /review/applications/{id}/status                transition (POST)
///
/// /dashboard                                      citizen dashboard
///
/// /notifications                                  list
/// /notifications/unread-count                     unread count
/// /notifications/read-all                         mark all read (POST)
/// /notifications/{id}/read                        mark one read (POST)
///
/// /admin/staff                                    list, register staff (admin)
/// /admin/staff-activity                           processed applications (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/services", services::router())
        .nest("/applications", applications::router())
        .nest("/review", review::router())
        .nest("/dashboard", dashboard::router())
        .nest("/notifications", notifications::router())
        .nest("/admin", admin::router())
}

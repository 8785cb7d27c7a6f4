//! Route definitions for a citizen's `/applications`.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET    /                              -> list_applications
/// POST   /                              -> submit_application
/// GET    /submission-form/{service_id}  -> submission_form
/// GET    /{id}                          -> get_application
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(applications::list_applications).post(applications::submit_application),
        )
        .route(
            "/submission-form/{service_id}",
            get(applications::submission_form),
        )
        .route("/{id}", get(applications::get_application))
}

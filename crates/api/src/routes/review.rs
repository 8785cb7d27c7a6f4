//! Route definitions for the staff review board.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/review`.
///
/// ```text
/// GET    /applications               -> list_review_applications
/// GET    /applications/{id}          -> get_review_application
/// POST   /applications/{id}/status   -> transition_application
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/applications", get(review::list_review_applications))
        .route("/applications/{id}", get(review::get_review_application))
        .route(
            "/applications/{id}/status",
            post(review::transition_application),
        )
}

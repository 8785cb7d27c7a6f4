//! Route definitions for `/auth`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /sign-up     -> sign_up (public, always citizen)
/// POST   /sign-in     -> sign_in (public)
/// POST   /refresh     -> refresh (public)
/// POST   /sign-out    -> sign_out (requires auth)
/// GET    /session     -> session (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-in", post(auth::sign_in))
        .route("/refresh", post(auth::refresh))
        .route("/sign-out", post(auth::sign_out))
        .route("/session", get(auth::session))
}

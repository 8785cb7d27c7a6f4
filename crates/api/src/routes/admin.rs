//! Route definitions for `/admin`. Every endpoint requires the admin role.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /staff             -> list_staff
/// POST   /staff             -> create_staff
/// GET    /staff-activity    -> staff_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/staff", get(admin::list_staff).post(admin::create_staff))
        .route("/staff-activity", get(admin::staff_activity))
}

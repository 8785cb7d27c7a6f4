//! Handler for the citizen `/dashboard`.

use axum::extract::State;
use axum::Json;
use egram_core::dashboard::RECENT_LIMIT;
use egram_core::review::StatusCounts;
use egram_db::models::application::ApplicationWithService;
use egram_db::models::notification::Notification;
use egram_db::repositories::{ApplicationRepo, NotificationRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub recent_applications: Vec<ApplicationWithService>,
    pub recent_notifications: Vec<Notification>,
    pub unread_count: i64,
    /// Counted over `recent_applications` only.
    pub counts: StatusCounts,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardView>>> {
    let recent_applications =
        ApplicationRepo::list_for_user(&state.pool, auth.user_id, Some(RECENT_LIMIT)).await?;
    let recent_notifications =
        NotificationRepo::list_for_user(&state.pool, auth.user_id, false, RECENT_LIMIT, 0).await?;
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    let counts = StatusCounts::tally(recent_applications.iter().map(|a| a.status()));

    Ok(Json(DataResponse {
        data: DashboardView {
            recent_applications,
            recent_notifications,
            unread_count,
            counts,
        },
    }))
}

//! Admin-only handlers: staff accounts and staff activity.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use egram_core::accounts::SignUpInput;
use egram_core::application_status::ApplicationStatus;
use egram_core::roles::Role;
use egram_db::models::application::StaffActivity;
use egram_db::models::profile::ProfileResponse;
use egram_db::repositories::{ApplicationRepo, ProfileRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::auth::register;
use crate::middleware::connectivity::RequireConnected;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ActivityCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Serialize)]
pub struct StaffActivityView {
    pub activity: Vec<StaffActivity>,
    pub counts: ActivityCounts,
}

/// POST /api/v1/admin/staff
///
/// Register a staff account. Same validation as public sign-up.
pub async fn create_staff(
    _connected: RequireConnected,
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<SignUpInput>,
) -> AppResult<(StatusCode, Json<DataResponse<ProfileResponse>>)> {
    let profile = register(&state, input, Role::Staff).await?;
    tracing::info!(user_id = profile.id, admin_id = admin.user_id, "Staff account created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: profile.into(),
        }),
    ))
}

/// GET /api/v1/admin/staff
pub async fn list_staff(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProfileResponse>>>> {
    let staff = ProfileRepo::list_by_role(&state.pool, Role::Staff).await?;
    Ok(Json(DataResponse {
        data: staff.into_iter().map(ProfileResponse::from).collect(),
    }))
}

/// GET /api/v1/admin/staff-activity
///
/// Applications a staff member has processed, with that member's name,
/// plus store-wide pending/approved/rejected counts.
pub async fn staff_activity(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StaffActivityView>>> {
    let activity = ApplicationRepo::list_processed(&state.pool).await?;
    let counts = ActivityCounts {
        pending: ApplicationRepo::count_with_status(&state.pool, ApplicationStatus::Pending).await?,
        approved: ApplicationRepo::count_with_status(&state.pool, ApplicationStatus::Approved)
            .await?,
        rejected: ApplicationRepo::count_with_status(&state.pool, ApplicationStatus::Rejected)
            .await?,
    };

    Ok(Json(DataResponse {
        data: StaffActivityView { activity, counts },
    }))
}

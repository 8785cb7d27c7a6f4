//! Handlers for the caller's own `/profile`.

use axum::extract::State;
use axum::Json;
use egram_core::accounts::ProfileUpdateInput;
use egram_core::error::CoreError;
use egram_db::models::profile::{ProfileResponse, UpdateProfile};
use egram_db::repositories::ProfileRepo;

use crate::cache::SCOPE_APPLICATIONS;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::connectivity::RequireConnected;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}

/// PUT /api/v1/profile
///
/// Update name, phone, or address. Email and role are not editable here.
///
/// Review rows carry the applicant's name and email, so a successful update
/// drops the cached application reads.
pub async fn update_profile(
    _connected: RequireConnected,
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProfileUpdateInput>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let input = input.normalized()?;
    let update = UpdateProfile {
        name: input.name,
        phone: input.phone,
        address: input.address,
    };

    let profile = ProfileRepo::update(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    state.cache.invalidate(&[SCOPE_APPLICATIONS]).await;

    tracing::info!(user_id = auth.user_id, "Profile updated");
    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}

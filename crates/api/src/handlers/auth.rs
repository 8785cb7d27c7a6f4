//! Handlers for the `/auth` resource (sign-up, sign-in, refresh, sign-out, session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use egram_core::accounts::{SignInInput, SignUpInput, DUPLICATE_EMAIL, INVALID_CREDENTIALS};
use egram_core::connectivity::ConnectivityState;
use egram_core::error::CoreError;
use egram_core::roles::Role;
use egram_db::models::profile::{CreateProfile, Profile, ProfileResponse};
use egram_db::models::session::CreateSession;
use egram_db::repositories::{ProfileRepo, SessionRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::connectivity::RequireConnected;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by sign-in and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: ProfileResponse,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub profile: ProfileResponse,
    pub connectivity: ConnectivityState,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/sign-up
///
/// Public registration. Always creates a `citizen`; any role in the body is ignored.
pub async fn sign_up(
    _connected: RequireConnected,
    State(state): State<AppState>,
    Json(input): Json<SignUpInput>,
) -> AppResult<(StatusCode, Json<DataResponse<ProfileResponse>>)> {
    let profile = register(&state, input, Role::Citizen).await?;
    tracing::info!(user_id = profile.id, "Citizen registered");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: profile.into(),
        }),
    ))
}

/// POST /api/v1/auth/sign-in
pub async fn sign_in(
    _connected: RequireConnected,
    State(state): State<AppState>,
    Json(input): Json<SignInInput>,
) -> AppResult<Json<AuthResponse>> {
    let input = input.normalized()?;

    let profile = ProfileRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&input.password, &profile.password_hash)? {
        tracing::info!(user_id = profile.id, "Sign-in rejected: wrong password");
        return Err(invalid_credentials());
    }

    let response = create_auth_response(&state, profile).await?;
    tracing::info!(user_id = response.user.id, "Signed in");
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair; the old session is revoked.
pub async fn refresh(
    _connected: RequireConnected,
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);
    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let session = SessionRepo::rotate(
        &state.pool,
        &token_hash,
        &refresh_hash,
        state.config.jwt.refresh_expires_at(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    })?;

    let profile = ProfileRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    tracing::debug!(user_id = profile.id, session_id = session.id, "Session rotated");
    Ok(Json(auth_response(&state, profile, refresh_plaintext)?))
}

/// POST /api/v1/auth/sign-out
///
/// Revoke every session of the caller. Returns 204 No Content.
pub async fn sign_out(
    _connected: RequireConnected,
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "Signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
///
/// Re-fetch the caller's profile together with the current connectivity state.
pub async fn session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(DataResponse {
        data: SessionView {
            profile: profile.into(),
            connectivity: state.connectivity.state().await,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

/// Validate, hash, and insert a new profile with `role`.
///
/// Shared by public sign-up and admin staff registration.
pub(crate) async fn register(
    state: &AppState,
    input: SignUpInput,
    role: Role,
) -> AppResult<Profile> {
    let input = input.normalized()?;

    if ProfileRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(DUPLICATE_EMAIL.into())));
    }

    let create = CreateProfile {
        name: input.name,
        email: input.email,
        password_hash: hash_password(&input.password)?,
        role,
    };

    // A concurrent sign-up can still hit the unique constraint.
    ProfileRepo::create(&state.pool, &create)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "uq_profiles_email") {
                AppError::Core(CoreError::Conflict(DUPLICATE_EMAIL.into()))
            } else {
                AppError::Database(e)
            }
        })
}

/// Open a session for `profile` and build the sign-in response.
async fn create_auth_response(state: &AppState, profile: Profile) -> AppResult<AuthResponse> {
    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let session_input = CreateSession {
        user_id: profile.id,
        refresh_token_hash: refresh_hash,
        expires_at: state.config.jwt.refresh_expires_at(),
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    auth_response(state, profile, refresh_plaintext)
}

fn auth_response(
    state: &AppState,
    profile: Profile,
    refresh_token: String,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(profile.id, profile.role(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: profile.into(),
    })
}

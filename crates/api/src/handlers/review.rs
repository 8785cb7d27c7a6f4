//! Handlers for the staff review board under `/review/applications`.
//!
//! Every endpoint requires a role that reviews applications.

use axum::extract::{Path, Query, State};
use axum::Json;
use egram_core::application_status::{ApplicationStatus, ReviewActions};
use egram_core::error::CoreError;
use egram_core::notices;
use egram_core::review::{ReviewFilter, ReviewRow, StatusCounts};
use egram_core::types::DbId;
use egram_db::models::application::{ReviewApplication, StatusTransition};
use egram_db::repositories::ApplicationRepo;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::cache::SCOPE_APPLICATIONS;
use crate::error::{AppError, AppResult};
use crate::handlers::notifications::send_notice;
use crate::middleware::connectivity::RequireConnected;
use crate::middleware::rbac::RequireReviewer;
use crate::query::ApplicationListParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    /// Target status name, e.g. `"in_review"`.
    pub status: String,
    /// Replaces the stored notes when non-blank.
    pub notes: Option<String>,
}

/// A review-board row with the actions its current status allows.
#[derive(Debug, Serialize)]
pub struct ReviewItem {
    #[serde(flatten)]
    pub application: ReviewApplication,
    pub actions: ReviewActions,
}

impl From<ReviewApplication> for ReviewItem {
    fn from(application: ReviewApplication) -> Self {
        let actions = ReviewActions::for_status(application.status());
        Self {
            application,
            actions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewBoard {
    pub applications: Vec<ReviewItem>,
    /// Counted over every application, before filtering.
    pub counts: StatusCounts,
}

fn application_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Application",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/review/applications
///
/// All applications with service and applicant, newest first. `?search=`
/// matches service name, applicant name, or id; `?status=` is `all` or one
/// status.
pub async fn list_review_applications(
    RequireReviewer(_reviewer): RequireReviewer,
    State(state): State<AppState>,
    Query(params): Query<ApplicationListParams>,
) -> AppResult<Json<Value>> {
    let filter = ReviewFilter {
        search: params.search.clone(),
        status: params.status_filter()?,
    };
    let key = format!("review&{}", params.cache_key());

    let board = state
        .cache
        .get_or_load(SCOPE_APPLICATIONS, key, || async {
            let rows = ApplicationRepo::list_for_review(&state.pool).await?;
            let counts = StatusCounts::tally(rows.iter().map(|row| row.status()));
            Ok(ReviewBoard {
                applications: filter.apply(rows).into_iter().map(ReviewItem::from).collect(),
                counts,
            })
        })
        .await?;

    Ok(Json(json!({ "data": board })))
}

/// GET /api/v1/review/applications/{id}
pub async fn get_review_application(
    RequireReviewer(_reviewer): RequireReviewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let application = ApplicationRepo::find_for_review(&state.pool, id)
        .await?
        .ok_or_else(|| application_not_found(id))?;
    let actions = ReviewActions::for_status(application.status());

    Ok(Json(json!({
        "data": { "application": application, "actions": actions }
    })))
}

/// POST /api/v1/review/applications/{id}/status
///
/// Move an application along the workflow. A change outside the transition
/// table is 409 `INVALID_TRANSITION`. If another reviewer changed the
/// status since it was read, nothing is written and the result is 409.
pub async fn transition_application(
    _connected: RequireConnected,
    RequireReviewer(reviewer): RequireReviewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<Json<Value>> {
    let next: ApplicationStatus = input
        .status
        .trim()
        .parse()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let current = ApplicationRepo::find_for_review(&state.pool, id)
        .await?
        .ok_or_else(|| application_not_found(id))?;
    let from = current.status();
    from.validate_transition(next)?;

    let notes = input
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let updated = ApplicationRepo::transition(
        &state.pool,
        &StatusTransition {
            id,
            expected: from,
            next,
            notes,
            processed_by: reviewer.user_id,
        },
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Application {id} changed status while it was being reviewed"
        )))
    })?;
    state.cache.invalidate(&[SCOPE_APPLICATIONS]).await;

    tracing::info!(
        application_id = id,
        reviewer_id = reviewer.user_id,
        from = %from,
        to = %next,
        "Application status changed",
    );

    let notification_created = send_notice(
        &state,
        current.user_id,
        notices::status_changed(current.service_name(), next),
    )
    .await;

    Ok(Json(json!({
        "data": {
            "application": updated,
            "notification_created": notification_created,
        }
    })))
}

//! Handlers for a citizen's own `/applications`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use egram_core::application_status::ProgressSummary;
use egram_core::error::CoreError;
use egram_core::notices;
use egram_core::placeholder;
use egram_core::review::matches_service_name;
use egram_core::submission::{empty_slots, fill_slots, validate_submission, SubmittedDocument};
use egram_core::types::DbId;
use egram_db::models::application::{ApplicationWithService, CreateApplication};
use egram_db::repositories::{ApplicationRepo, ServiceRepo};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::SCOPE_APPLICATIONS;
use crate::error::{AppError, AppResult};
use crate::handlers::notifications::send_notice;
use crate::middleware::auth::AuthUser;
use crate::middleware::connectivity::RequireConnected;
use crate::query::ApplicationListParams;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitApplicationRequest {
    pub service_id: DbId,
    pub notes: Option<String>,
    /// One entry per attached file, matched to a required document by name.
    #[serde(default)]
    pub documents: Vec<SubmittedDocument>,
}

fn service_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    })
}

/// GET /api/v1/applications
///
/// The caller's applications, newest first. `?status=` is `all` or one
/// status; `?search=` matches the service name.
pub async fn list_applications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ApplicationListParams>,
) -> AppResult<Json<Value>> {
    let filter = params.status_filter()?;
    let key = format!("user={}&{}", auth.user_id, params.cache_key());

    let applications = state
        .cache
        .get_or_load(SCOPE_APPLICATIONS, key, || async {
            let rows = ApplicationRepo::list_for_user(&state.pool, auth.user_id, None).await?;
            Ok(rows
                .into_iter()
                .filter(|row| filter.matches(row.status()))
                .filter(|row| matches_service_name(&row.service_name, params.search.as_deref()))
                .collect::<Vec<ApplicationWithService>>())
        })
        .await?;

    Ok(Json(json!({ "data": applications })))
}

/// GET /api/v1/applications/submission-form/{service_id}
///
/// The service and one empty upload slot per required document.
pub async fn submission_form(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(service_id): Path<DbId>,
) -> AppResult<Json<Value>> {
    if !state.connectivity.state().await.uses_placeholders() {
        match ServiceRepo::find_by_id(&state.pool, service_id).await {
            Ok(Some(service)) => {
                let slots = empty_slots(&service.documents_required);
                return Ok(Json(json!({
                    "data": { "service": service, "slots": slots, "is_placeholder": false }
                })));
            }
            Ok(None) => return Err(service_not_found(service_id)),
            Err(e) => {
                let e = AppError::Database(e);
                if !state.connectivity.record_failure(&e).await {
                    return Err(e);
                }
            }
        }
    }

    let service = placeholder::service(service_id).ok_or_else(|| service_not_found(service_id))?;
    let required: Vec<String> = service
        .documents_required
        .iter()
        .map(|doc| doc.to_string())
        .collect();
    Ok(Json(json!({
        "data": {
            "service": service,
            "slots": empty_slots(&required),
            "is_placeholder": true,
        }
    })))
}

/// POST /api/v1/applications
///
/// Every required document must have an attached file name. One
/// `pending` application is stored, then a confirmation notification is
/// attempted. A failed notification does not fail the submission.
pub async fn submit_application(
    _connected: RequireConnected,
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitApplicationRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let service = ServiceRepo::find_by_id(&state.pool, input.service_id)
        .await?
        .ok_or_else(|| service_not_found(input.service_id))?;

    let slots = fill_slots(&service.documents_required, &input.documents);
    let documents = validate_submission(&slots)?;

    let notes = input
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let application = ApplicationRepo::create(
        &state.pool,
        &CreateApplication {
            user_id: auth.user_id,
            service_id: service.id,
            notes,
            documents,
        },
    )
    .await?;
    state.cache.invalidate(&[SCOPE_APPLICATIONS]).await;

    tracing::info!(
        application_id = application.id,
        user_id = auth.user_id,
        service_id = service.id,
        "Application submitted",
    );

    let notification_created =
        send_notice(&state, auth.user_id, notices::submitted(&service.name)).await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "data": {
                "application": application,
                "notification_created": notification_created,
            }
        })),
    ))
}

/// GET /api/v1/applications/{id}
///
/// One of the caller's own applications with its service and a progress
/// summary. Another user's id is 404.
pub async fn get_application(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    if !state.connectivity.state().await.uses_placeholders() {
        match ApplicationRepo::find_for_user(&state.pool, id, auth.user_id).await {
            Ok(Some(application)) => {
                let progress = ProgressSummary::for_status(application.status());
                return Ok(Json(json!({
                    "data": {
                        "application": application,
                        "progress": progress,
                        "is_placeholder": false,
                    }
                })));
            }
            Ok(None) => {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Application",
                    id,
                }))
            }
            Err(e) => {
                let e = AppError::Database(e);
                if !state.connectivity.record_failure(&e).await {
                    return Err(e);
                }
            }
        }
    }

    let application = placeholder::application(id);
    let progress = ProgressSummary::for_status(application.status);
    Ok(Json(json!({
        "data": {
            "application": application,
            "progress": progress,
            "is_placeholder": true,
        }
    })))
}

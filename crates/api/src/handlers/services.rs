//! Handlers for the `/services` catalog.
//!
//! Reads are public and fall back to placeholder data while the store is
//! unreachable. Writes require an admin and a live connection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use egram_core::catalog::{filter_by_search, validate_fee, DeleteDecision, DocumentListInput};
use egram_core::error::CoreError;
use egram_core::placeholder;
use egram_core::types::DbId;
use egram_db::models::service::{CreateService, Service, UpdateService};
use egram_db::repositories::ServiceRepo;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::{SCOPE_APPLICATIONS, SCOPE_SERVICES};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::connectivity::RequireConnected;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: String,
    /// A JSON list or a comma-separated string.
    pub documents_required: Option<DocumentListInput>,
    pub fee: Option<f64>,
    pub processing_time: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub documents_required: Option<DocumentListInput>,
    pub fee: Option<f64>,
    pub processing_time: Option<String>,
}

fn required_text(value: String, message: &str) -> Result<String, AppError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::Core(CoreError::Validation(message.into())));
    }
    Ok(value)
}

fn optional_text(value: Option<String>, message: &str) -> Result<Option<String>, AppError> {
    value.map(|v| required_text(v, message)).transpose()
}

impl CreateServiceRequest {
    fn into_create(self) -> Result<CreateService, AppError> {
        validate_fee(self.fee)?;
        Ok(CreateService {
            name: required_text(self.name, "Service name is required")?,
            description: required_text(self.description, "Description is required")?,
            documents_required: self
                .documents_required
                .map(DocumentListInput::into_names)
                .unwrap_or_default(),
            fee: self.fee,
            processing_time: Some(required_text(
                self.processing_time,
                "Processing time is required",
            )?),
        })
    }
}

impl UpdateServiceRequest {
    fn into_update(self) -> Result<UpdateService, AppError> {
        validate_fee(self.fee)?;
        Ok(UpdateService {
            name: optional_text(self.name, "Service name is required")?,
            description: optional_text(self.description, "Description is required")?,
            documents_required: self.documents_required.map(DocumentListInput::into_names),
            fee: self.fee,
            processing_time: optional_text(self.processing_time, "Processing time is required")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/services
///
/// Catalog ordered by name, filtered by `?search=` over name and
/// description. `can_manage` tells the client whether to show admin actions.
pub async fn list_services(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Value>> {
    let can_manage = caller.is_some_and(|user| user.role.can_manage_catalog());
    let search = params.search.as_deref();

    if !state.connectivity.state().await.uses_placeholders() {
        let key = format!("list&search={}", search.unwrap_or("").trim().to_lowercase());
        let loaded = state
            .cache
            .get_or_load(SCOPE_SERVICES, key, || async {
                let services = ServiceRepo::list(&state.pool).await?;
                Ok(filter_by_search(services, search, |s: &Service| {
                    (s.name.as_str(), s.description.as_str())
                }))
            })
            .await;

        match loaded {
            Ok(services) => {
                return Ok(Json(json!({
                    "data": {
                        "services": services,
                        "can_manage": can_manage,
                        "is_placeholder": false,
                    }
                })));
            }
            Err(e) => {
                if !state.connectivity.record_failure(&e).await {
                    return Err(e);
                }
            }
        }
    }

    let services = filter_by_search(placeholder::services(), search, |s| {
        (s.name, s.description)
    });
    Ok(Json(json!({
        "data": {
            "services": services,
            "can_manage": can_manage,
            "is_placeholder": true,
        }
    })))
}

/// GET /api/v1/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    if !state.connectivity.state().await.uses_placeholders() {
        let loaded = state
            .cache
            .get_or_load(SCOPE_SERVICES, format!("id={id}"), || async {
                ServiceRepo::find_by_id(&state.pool, id)
                    .await?
                    .ok_or(AppError::Core(CoreError::NotFound {
                        entity: "Service",
                        id,
                    }))
            })
            .await;

        match loaded {
            Ok(service) => {
                return Ok(Json(json!({
                    "data": { "service": service, "is_placeholder": false }
                })));
            }
            Err(e) => {
                if !state.connectivity.record_failure(&e).await {
                    return Err(e);
                }
            }
        }
    }

    let service = placeholder::service(id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    }))?;
    Ok(Json(json!({
        "data": { "service": service, "is_placeholder": true }
    })))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/services
pub async fn create_service(
    _connected: RequireConnected,
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Service>>)> {
    let create = input.into_create()?;
    let service = ServiceRepo::create(&state.pool, &create).await?;
    state
        .cache
        .invalidate(&[SCOPE_SERVICES, SCOPE_APPLICATIONS])
        .await;

    tracing::info!(service_id = service.id, admin_id = admin.user_id, "Service created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// PUT /api/v1/services/{id}
pub async fn update_service(
    _connected: RequireConnected,
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateServiceRequest>,
) -> AppResult<Json<DataResponse<Service>>> {
    let update = input.into_update()?;
    let service = ServiceRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    state
        .cache
        .invalidate(&[SCOPE_SERVICES, SCOPE_APPLICATIONS])
        .await;

    tracing::info!(service_id = id, admin_id = admin.user_id, "Service updated");
    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/v1/services/{id}
///
/// The first call arms the delete and returns 202. A second call on the
/// same id by the same admin, before the flag expires, deletes and returns
/// 204. A service still referenced by applications is 409.
pub async fn delete_service(
    _connected: RequireConnected,
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    match state.delete_confirmations.request(admin.user_id, id).await {
        DeleteDecision::Armed => {
            tracing::info!(service_id = id, admin_id = admin.user_id, "Service delete armed");
            Ok((
                StatusCode::ACCEPTED,
                Json(json!({ "data": { "armed": true, "id": id } })),
            )
                .into_response())
        }
        DeleteDecision::Confirmed => {
            let deleted = ServiceRepo::delete(&state.pool, id).await?;
            if !deleted {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Service",
                    id,
                }));
            }
            state
                .cache
                .invalidate(&[SCOPE_SERVICES, SCOPE_APPLICATIONS])
                .await;

            tracing::info!(service_id = id, admin_id = admin.user_id, "Service deleted");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

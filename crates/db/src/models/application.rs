//! Application entity model, joined read models, and DTOs.

use egram_core::application_status::{ApplicationStatus, StatusId};
use egram_core::review::ReviewRow;
use egram_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::status::{resolve, serialize_status};

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub user_id: DbId,
    pub service_id: DbId,
    #[serde(rename = "status", serialize_with = "serialize_status")]
    pub status_id: StatusId,
    pub notes: Option<String>,
    pub documents: Vec<String>,
    pub processed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Application {
    pub fn status(&self) -> ApplicationStatus {
        resolve(self.status_id)
    }
}

/// An application joined with its service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationWithService {
    pub id: DbId,
    pub user_id: DbId,
    pub service_id: DbId,
    #[serde(rename = "status", serialize_with = "serialize_status")]
    pub status_id: StatusId,
    pub notes: Option<String>,
    pub documents: Vec<String>,
    pub processed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub service_name: String,
    pub service_description: String,
    pub service_fee: Option<f64>,
    pub service_processing_time: Option<String>,
}

impl ApplicationWithService {
    pub fn status(&self) -> ApplicationStatus {
        resolve(self.status_id)
    }
}

/// An application joined with its service and applicant, for the review board.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewApplication {
    pub id: DbId,
    pub user_id: DbId,
    pub service_id: DbId,
    #[serde(rename = "status", serialize_with = "serialize_status")]
    pub status_id: StatusId,
    pub notes: Option<String>,
    pub documents: Vec<String>,
    pub processed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub service_name: String,
    pub applicant_name: String,
    pub applicant_email: String,
}

impl ReviewRow for ReviewApplication {
    fn id(&self) -> DbId {
        self.id
    }

    fn status(&self) -> ApplicationStatus {
        resolve(self.status_id)
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn applicant_name(&self) -> &str {
        &self.applicant_name
    }
}

/// A processed application with the name of the staff member who handled it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StaffActivity {
    pub id: DbId,
    #[serde(rename = "status", serialize_with = "serialize_status")]
    pub status_id: StatusId,
    pub service_name: String,
    pub applicant_name: String,
    pub processed_by: DbId,
    /// `"Unknown"` when the staff profile no longer resolves.
    pub staff_name: String,
    pub updated_at: Timestamp,
}

pub struct CreateApplication {
    pub user_id: DbId,
    pub service_id: DbId,
    pub notes: Option<String>,
    pub documents: Vec<String>,
}

/// A status change, applied only if the row still has `expected` status.
pub struct StatusTransition {
    pub id: DbId,
    pub expected: ApplicationStatus,
    pub next: ApplicationStatus,
    /// New notes; `None` keeps the existing notes.
    pub notes: Option<String>,
    pub processed_by: DbId,
}

//! Service catalog entity model and DTOs.

use egram_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub documents_required: Vec<String>,
    pub fee: Option<f64>,
    pub processing_time: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateService {
    pub name: String,
    pub description: String,
    pub documents_required: Vec<String>,
    pub fee: Option<f64>,
    pub processing_time: Option<String>,
}

/// Only non-`None` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub documents_required: Option<Vec<String>>,
    pub fee: Option<f64>,
    pub processing_time: Option<String>,
}

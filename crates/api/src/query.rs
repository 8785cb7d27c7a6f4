//! Shared query parameter types for API handlers.

use egram_core::error::CoreError;
use egram_core::review::StatusFilter;
use serde::Deserialize;

use crate::error::AppError;

/// `?search=&status=` as used by application lists.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationListParams {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ApplicationListParams {
    pub fn status_filter(&self) -> Result<StatusFilter, AppError> {
        StatusFilter::parse(self.status.as_deref())
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))
    }

    /// Normalized form used in cache keys.
    pub fn cache_key(&self) -> String {
        format!(
            "status={}&search={}",
            self.status.as_deref().unwrap_or("all").trim(),
            self.search.as_deref().unwrap_or("").trim().to_lowercase()
        )
    }
}

/// `?search=` as used by the catalog.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

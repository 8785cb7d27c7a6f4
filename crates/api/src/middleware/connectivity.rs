//! Connectivity gate for mutating routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use egram_core::connectivity::UNAVAILABLE_MESSAGE;
use egram_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Rejects with 503 unless the last probe succeeded.
///
/// List it before any extractor that touches the store or reads the body,
/// so a refused mutation issues no query.
pub struct RequireConnected;

impl FromRequestParts<AppState> for RequireConnected {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = state.connectivity.state().await;
        if !current.allows_mutations() {
            tracing::info!(connectivity = %current, "Mutation refused while store is unreachable");
            return Err(AppError::Core(CoreError::Unavailable(
                UNAVAILABLE_MESSAGE.into(),
            )));
        }
        Ok(RequireConnected)
    }
}

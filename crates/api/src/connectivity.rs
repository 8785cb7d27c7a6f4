//! Shared connectivity state for the backing store.
//!
//! Starts in `checking`. Each probe moves it to `connected` or `error`;
//! transitions are logged once.

use egram_core::connectivity::ConnectivityState;
use egram_db::DbPool;
use tokio::sync::RwLock;

use crate::error::AppError;

#[derive(Debug, Default)]
pub struct ConnectivityMonitor {
    state: RwLock<ConnectivityState>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A monitor fixed at `state` until the next probe.
    pub fn with_state(state: ConnectivityState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub async fn state(&self) -> ConnectivityState {
        *self.state.read().await
    }

    /// Record a new state, logging only when it changes.
    pub async fn set(&self, next: ConnectivityState) {
        let mut guard = self.state.write().await;
        let previous = *guard;
        if previous == next {
            return;
        }
        *guard = next;
        drop(guard);

        match next {
            ConnectivityState::Connected => {
                tracing::info!(from = %previous, "Store connectivity established")
            }
            ConnectivityState::Error => {
                tracing::warn!(from = %previous, "Store unreachable; mutations disabled")
            }
            ConnectivityState::Checking => {
                tracing::debug!(from = %previous, "Connectivity reset to checking")
            }
        }
    }

    /// Move to `error` if a read failed because the store is unreachable.
    ///
    /// Returns `true` when the caller should fall back to placeholder data.
    pub async fn record_failure(&self, err: &AppError) -> bool {
        if !err.is_connection_failure() {
            return false;
        }
        tracing::warn!(error = %err, "Read failed; store marked unreachable");
        self.set(ConnectivityState::Error).await;
        true
    }

    /// Run the catalog probe and record the outcome.
    pub async fn probe(&self, pool: &DbPool) -> ConnectivityState {
        let outcome = egram_db::probe_catalog(pool).await;
        if let Err(e) = &outcome {
            tracing::debug!(error = %e, "Connectivity probe failed");
        }
        let next = ConnectivityState::from_probe(outcome.is_ok());
        self.set(next).await;
        next
    }
}

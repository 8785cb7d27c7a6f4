//! Periodic re-probe of the backing store.
//!
//! The startup probe runs in `main` before this loop starts, so the first
//! tick here is one full period later.

use std::sync::Arc;
use std::time::Duration;

use egram_db::DbPool;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::connectivity::ConnectivityMonitor;

/// Probe every `period` until `cancel` is triggered.
pub async fn run(
    pool: DbPool,
    monitor: Arc<ConnectivityMonitor>,
    period: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs = period.as_secs(), "Connectivity probe started");

    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Connectivity probe stopping");
                break;
            }
            _ = interval.tick() => {
                let state = monitor.probe(&pool).await;
                tracing::debug!(connectivity = %state, "Connectivity probe tick");
            }
        }
    }
}

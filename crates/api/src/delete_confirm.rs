//! Two-step delete confirmation, tracked per admin.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use egram_core::catalog::{DeleteArming, DeleteDecision};
use egram_core::types::DbId;
use tokio::sync::Mutex;

pub struct DeleteConfirmations {
    by_admin: Mutex<HashMap<DbId, DeleteArming>>,
    ttl: Duration,
}

impl DeleteConfirmations {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            by_admin: Mutex::new(HashMap::new()),
            ttl: Duration::from_std(ttl).unwrap_or(Duration::seconds(120)),
        }
    }

    /// Record a delete request by `admin_id` for row `id`.
    pub async fn request(&self, admin_id: DbId, id: DbId) -> DeleteDecision {
        let now = Utc::now();
        let mut by_admin = self.by_admin.lock().await;
        let arming = by_admin.entry(admin_id).or_default();
        arming.prune(now, self.ttl);
        let decision = arming.request(id, now, self.ttl);
        if arming.is_empty() {
            by_admin.remove(&admin_id);
        }
        decision
    }

    pub async fn is_armed(&self, admin_id: DbId, id: DbId) -> bool {
        self.by_admin
            .lock()
            .await
            .get(&admin_id)
            .is_some_and(|arming| arming.is_armed(id))
    }
}

//! Keyed request cache with TTL and scope invalidation.
//!
//! Entries are keyed by `(scope, key)`. The scope names the table a read
//! depends on; the key holds the filters and, where relevant, the caller id.
//! Payloads are stored as serialized JSON. Writes drop whole scopes.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

pub const SCOPE_SERVICES: &str = "services";
pub const SCOPE_APPLICATIONS: &str = "applications";

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

pub struct QueryCache {
    entries: RwLock<HashMap<(&'static str, String), CacheEntry>>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// A fresh entry, if any.
    pub async fn get(&self, scope: &'static str, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(&(scope, key.to_string()))
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Store `value`, sweeping out stale entries first.
    pub async fn put(&self, scope: &'static str, key: String, value: Value) {
        let ttl = self.ttl;
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            (scope, key),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Return the cached payload, or run `load`, cache its result, and
    /// return it. Errors are not cached.
    pub async fn get_or_load<T, F, Fut>(
        &self,
        scope: &'static str,
        key: String,
        load: F,
    ) -> AppResult<Value>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(hit) = self.get(scope, &key).await {
            tracing::debug!(scope, key = %key, "Query cache hit");
            return Ok(hit);
        }
        let loaded = load().await?;
        let value = serde_json::to_value(&loaded)
            .map_err(|e| AppError::InternalError(format!("Cache serialization error: {e}")))?;
        self.put(scope, key, value.clone()).await;
        Ok(value)
    }

    /// Drop every entry in each of `scopes`.
    pub async fn invalidate(&self, scopes: &[&'static str]) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|(scope, _), _| !scopes.contains(scope));
        tracing::debug!(?scopes, dropped = before - entries.len(), "Query cache invalidated");
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

use std::sync::Arc;
use std::time::Duration;

use crate::cache::QueryCache;
use crate::config::ServerConfig;
use crate::connectivity::ConnectivityMonitor;
use crate::delete_confirm::DeleteConfirmations;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup and cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    pub pool: egram_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub connectivity: Arc<ConnectivityMonitor>,
    pub cache: Arc<QueryCache>,
    pub delete_confirmations: Arc<DeleteConfirmations>,
}

impl AppState {
    pub fn new(pool: egram_db::DbPool, config: ServerConfig, connectivity: ConnectivityMonitor) -> Self {
        let cache = QueryCache::new(Duration::from_secs(config.query_cache_ttl_secs));
        let delete_confirmations =
            DeleteConfirmations::new(Duration::from_secs(config.delete_confirm_ttl_secs));
        Self {
            pool,
            config: Arc::new(config),
            connectivity: Arc::new(connectivity),
            cache: Arc::new(cache),
            delete_confirmations: Arc::new(delete_confirmations),
        }
    }
}

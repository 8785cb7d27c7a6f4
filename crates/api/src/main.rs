use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use egram_api::background;
use egram_api::bootstrap::ensure_admin;
use egram_api::config::{BootstrapAdmin, ServerConfig};
use egram_api::connectivity::ConnectivityMonitor;
use egram_api::router::build_app_router;
use egram_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "egram_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    // The pool connects lazily; an unreachable store leaves the server up in
    // degraded mode rather than aborting startup.
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = egram_db::create_pool(&database_url).expect("Invalid DATABASE_URL");
    tracing::info!("Database connection pool created");

    match egram_db::run_migrations(&pool).await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::error!(error = %e, "Database migrations failed; continuing degraded"),
    }

    if let Some(admin) = BootstrapAdmin::from_env() {
        match ensure_admin(&pool, &admin).await {
            Ok(outcome) => tracing::info!(?outcome, "Bootstrap admin ensured"),
            Err(e) => tracing::error!(error = %e, "Bootstrap admin failed"),
        }
    }

    // --- Connectivity ---
    let connectivity = ConnectivityMonitor::new();
    let initial = connectivity.probe(&pool).await;
    tracing::info!(connectivity = %initial, "Initial connectivity probe");

    // --- App state ---
    let state = AppState::new(pool.clone(), config.clone(), connectivity);

    // --- Background tasks ---
    let cancel = CancellationToken::new();

    let probe_handle = tokio::spawn(background::connectivity_probe::run(
        pool.clone(),
        Arc::clone(&state.connectivity),
        Duration::from_secs(config.connectivity_probe_interval_secs),
        cancel.clone(),
    ));
    let cleanup_handle = tokio::spawn(background::session_cleanup::run(
        pool.clone(),
        cancel.clone(),
    ));

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    let _ = tokio::time::timeout(grace, probe_handle).await;
    let _ = tokio::time::timeout(grace, cleanup_handle).await;
    tracing::info!("Background tasks stopped");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for background tasks to stop after the server drains.
    pub shutdown_timeout_secs: u64,
    /// Seconds between connectivity probes (default: `30`, minimum `1`).
    pub connectivity_probe_interval_secs: u64,
    /// Lifetime of a cached read in seconds (default: `30`).
    pub query_cache_ttl_secs: u64,
    /// How long an armed delete waits for its confirming request (default: `120`).
    pub delete_confirm_ttl_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                            | Default                 |
    /// |------------------------------------|-------------------------|
    /// | `HOST`                             | `0.0.0.0`               |
    /// | `PORT`                             | `3000`                  |
    /// | `CORS_ORIGINS`                     | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`             | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`            | `30`                    |
    /// | `CONNECTIVITY_PROBE_INTERVAL_SECS` | `30`                    |
    /// | `QUERY_CACHE_TTL_SECS`             | `30`                    |
    /// | `DELETE_CONFIRM_TTL_SECS`          | `120`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: env_u64("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_u64("SHUTDOWN_TIMEOUT_SECS", 30),
            connectivity_probe_interval_secs: at_least(
                "CONNECTIVITY_PROBE_INTERVAL_SECS",
                env_u64("CONNECTIVITY_PROBE_INTERVAL_SECS", 30),
                MIN_PROBE_INTERVAL_SECS,
            ),
            query_cache_ttl_secs: env_u64("QUERY_CACHE_TTL_SECS", 30),
            delete_confirm_ttl_secs: env_u64("DELETE_CONFIRM_TTL_SECS", 120),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// `tokio::time::interval` panics on a zero period.
pub const MIN_PROBE_INTERVAL_SECS: u64 = 1;

/// Raise `value` to `min`, logging when the configured value was too small.
fn at_least(name: &str, value: u64, min: u64) -> u64 {
    if value < min {
        tracing::warn!(name, value, min, "Configured value below minimum, using minimum");
        min
    } else {
        value
    }
}

/// Read a `u64` env var, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but not a valid `u64`.
fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid u64")),
        Err(_) => default,
    }
}

/// Credentials for the admin account ensured at startup.
///
/// | Env Var                    | Default         |
/// |----------------------------|-----------------|
/// | `BOOTSTRAP_ADMIN_EMAIL`    | unset (skipped) |
/// | `BOOTSTRAP_ADMIN_PASSWORD` | unset (skipped) |
/// | `BOOTSTRAP_ADMIN_NAME`     | `Administrator` |
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl BootstrapAdmin {
    /// `None` unless both email and password are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("BOOTSTRAP_ADMIN_EMAIL").ok()?;
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;
        if email.trim().is_empty() || password.is_empty() {
            return None;
        }
        let name =
            std::env::var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|_| "Administrator".into());
        Some(Self {
            email,
            password,
            name,
        })
    }
}

//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Unset or unparsable optional values
//! fall back to defaults; only a malformed `LISTEN_ADDR` or
//! `AUTH_TOKEN_SECRET` is a startup error.

use std::net::SocketAddr;

use crate::domain::ranking::MAX_LEADERBOARD_LIMIT;

/// Which [`crate::store::Store`] implementation backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local maps; state is lost on restart.
    Memory,
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3002`).
    pub listen_addr: SocketAddr,

    /// Store implementation.
    pub store_backend: StoreBackend,

    /// PostgreSQL connection string. Without it the postgres backend runs
    /// with no store behind it.
    pub database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Whether to apply embedded migrations on startup.
    pub database_run_migrations: bool,

    /// Salt appended to game API keys before hashing.
    pub api_key_salt: String,

    /// HMAC key for bearer tokens. `None` means a random per-process key.
    pub auth_token_secret: Option<Vec<u8>>,

    /// Shared secret for admin endpoints. `None` disables them.
    pub admin_api_key: Option<String>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Default number of leaderboard rows.
    pub leaderboard_default_limit: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3002)),
            store_backend: StoreBackend::Memory,
            database_url: None,
            database_max_connections: 10,
            database_min_connections: 1,
            database_connect_timeout_secs: 5,
            database_run_migrations: true,
            api_key_salt: "default-salt".to_string(),
            auth_token_secret: None,
            admin_api_key: None,
            request_timeout_secs: 30,
            leaderboard_default_limit: MAX_LEADERBOARD_LIMIT,
            log_format: LogFormat::Pretty,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to [`GatewayConfig::default`] values when a variable is
    /// not set. Calls `dotenvy::dotenv().ok()` to optionally load a `.env`
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as a
    /// [`SocketAddr`], or `AUTH_TOKEN_SECRET` is set but is not hex.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let store_backend = match env_string("STORE_BACKEND").as_deref() {
            Some("postgres") | Some("POSTGRES") => StoreBackend::Postgres,
            _ => StoreBackend::Memory,
        };

        let auth_token_secret = env_string("AUTH_TOKEN_SECRET")
            .map(hex::decode)
            .transpose()?;

        let log_format = match env_string("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            store_backend,
            database_url: env_string("DATABASE_URL"),
            database_max_connections: parse_env(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            database_min_connections: parse_env(
                "DATABASE_MIN_CONNECTIONS",
                defaults.database_min_connections,
            ),
            database_connect_timeout_secs: parse_env(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                defaults.database_connect_timeout_secs,
            ),
            database_run_migrations: parse_env_bool(
                "DATABASE_RUN_MIGRATIONS",
                defaults.database_run_migrations,
            ),
            api_key_salt: env_string("API_KEY_SALT").unwrap_or(defaults.api_key_salt),
            auth_token_secret,
            admin_api_key: env_string("ADMIN_API_KEY"),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            leaderboard_default_limit: parse_env(
                "LEADERBOARD_DEFAULT_LIMIT",
                defaults.leaderboard_default_limit,
            )
            .clamp(1, MAX_LEADERBOARD_LIMIT),
            log_format,
        })
    }
}

/// Returns a non-empty environment variable.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr.port(), 3002);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.api_key_salt, "default-salt");
        assert_eq!(config.leaderboard_default_limit, 100);
        assert!(config.admin_api_key.is_none());
    }

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        let value: u32 = parse_env("PLAYRUSH_TEST_SURELY_UNSET_KEY", 7);
        assert_eq!(value, 7);
        assert!(parse_env_bool("PLAYRUSH_TEST_SURELY_UNSET_KEY", true));
    }
}

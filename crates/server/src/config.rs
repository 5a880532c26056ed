//! Tap list configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `TAPLIST_HOST` - Bind address (default: 0.0.0.0)
//! - `TAPLIST_PORT` - Listen port, falls back to `PORT` (default: 3000)
//! - `TAPLIST_DATA_DIR` - Directory holding `taplist.db` (default: data)
//! - `TAPLIST_UPLOAD_DIR` - Directory for uploaded images (default: uploads)
//! - `TAPLIST_PUBLIC_DIR` - Directory for static assets (default: crates/server/public)
//! - `TAPLIST_LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// File name of the `SQLite` database inside the data directory.
pub const DATABASE_FILE: &str = "taplist.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Tap list application configuration.
#[derive(Debug, Clone)]
pub struct TaplistConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the `SQLite` database
    pub data_dir: PathBuf,
    /// Directory uploaded images are written to and served from
    pub upload_dir: PathBuf,
    /// Directory of static assets served under `/public`
    pub public_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl Default for TaplistConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            data_dir: PathBuf::from("data"),
            upload_dir: PathBuf::from("uploads"),
            public_dir: PathBuf::from("crates/server/public"),
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl TaplistConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = match get_optional_env("TAPLIST_HOST") {
            Some(value) => parse_var("TAPLIST_HOST", &value)?,
            None => defaults.host,
        };
        let port = match get_port_var() {
            Some((key, value)) => parse_var(key, &value)?,
            None => defaults.port,
        };
        let sentry_sample_rate = match get_optional_env("SENTRY_SAMPLE_RATE") {
            Some(value) => parse_rate("SENTRY_SAMPLE_RATE", &value)?,
            None => defaults.sentry_sample_rate,
        };
        let sentry_traces_sample_rate = match get_optional_env("SENTRY_TRACES_SAMPLE_RATE") {
            Some(value) => parse_rate("SENTRY_TRACES_SAMPLE_RATE", &value)?,
            None => defaults.sentry_traces_sample_rate,
        };

        Ok(Self {
            host,
            port,
            data_dir: get_optional_env("TAPLIST_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            upload_dir: get_optional_env("TAPLIST_UPLOAD_DIR")
                .map_or(defaults.upload_dir, PathBuf::from),
            public_dir: get_optional_env("TAPLIST_PUBLIC_DIR")
                .map_or(defaults.public_dir, PathBuf::from),
            log_format: get_optional_env("TAPLIST_LOG_FORMAT")
                .map_or(LogFormat::Text, |value| parse_log_format(&value)),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path of the `SQLite` database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get the port with fallback to generic `PORT` (set by most process managers).
fn get_port_var() -> Option<(&'static str, String)> {
    get_optional_env("TAPLIST_PORT")
        .map(|value| ("TAPLIST_PORT", value))
        .or_else(|| get_optional_env("PORT").map(|value| ("PORT", value)))
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_var(key, value)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

fn parse_log_format(value: &str) -> LogFormat {
    if value.trim().eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    }
}

//! Logging context for the service.
//!
//! The subscriber is built once from an explicitly constructed
//! [`LoggingConfig`] and installed at startup; components never consult
//! environment-driven logging globals afterwards. Every event in the
//! system carries a `component`, an `operation`, and (inside a request) a
//! `correlation_id` field.

use crate::config::Environment;
use std::env;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for development.
    Pretty,
    /// Single-line JSON for production log shipping.
    Json,
}

/// Explicit logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `taskdesk=debug`.
    pub level: String,
    /// Event output format.
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Derives logging configuration from `LOG_LEVEL` / `LOG_FORMAT`,
    /// with environment-appropriate defaults: development logs pretty at
    /// `debug`, everything else logs JSON at `info`.
    #[must_use]
    pub fn from_env(environment: Environment) -> Self {
        let default_level = match environment {
            Environment::Development => "debug",
            Environment::Production | Environment::Test => "info",
        };
        let level = env::var("LOG_LEVEL").unwrap_or_else(|_| default_level.to_owned());
        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ => match environment {
                Environment::Development | Environment::Test => LogFormat::Pretty,
                Environment::Production => LogFormat::Json,
            },
        };
        Self { level, format }
    }
}

/// Error raised when the global subscriber cannot be installed.
#[derive(Debug, Error)]
#[error("failed to install logging subscriber: {0}")]
pub struct LoggingInitError(String);

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`LoggingInitError`] when a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingInitError> {
    let filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.format {
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|err| LoggingInitError(err.to_string())),
        LogFormat::Pretty => builder
            .try_init()
            .map_err(|err| LoggingInitError(err.to_string())),
    }
}

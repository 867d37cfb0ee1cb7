//! Application configuration.
//!
//! Configuration is parsed from the environment exactly once at startup
//! and passed to components explicitly; nothing reads environment
//! variables afterwards.

use std::env;
use thiserror::Error;

/// Default listen port when `PORT` is unset.
const DEFAULT_PORT: u16 = 3000;
/// Default API path prefix when `API_PREFIX` is unset.
const DEFAULT_API_PREFIX: &str = "/api";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development: pretty logs, verbose errors.
    #[default]
    Development,
    /// Production: JSON logs, generic error bodies.
    Production,
    /// Test runs.
    Test,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_owned())),
        }
    }
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `PORT` is not a valid TCP port number.
    #[error("invalid listen port '{0}', expected 1-65535")]
    InvalidPort(String),

    /// `API_PREFIX` does not start with a slash.
    #[error("invalid API prefix '{0}', expected a leading '/'")]
    InvalidPrefix(String),

    /// `APP_ENV` names an unknown environment.
    #[error("unknown environment '{0}', expected development, production, or test")]
    InvalidEnvironment(String),
}

/// Startup configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// TCP port the listener binds.
    pub listen_port: u16,
    /// Path prefix the CRUD routes are mounted under.
    pub api_prefix: String,
    /// Deployment environment.
    pub environment: Environment,
}

impl AppConfig {
    /// Reads configuration from `PORT`, `API_PREFIX`, and `APP_ENV`,
    /// falling back to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT").map_or(Ok(DEFAULT_PORT), |raw| parse_port(&raw))?;
        let prefix = env::var("API_PREFIX")
            .map_or_else(|_| Ok(DEFAULT_API_PREFIX.to_owned()), |raw| parse_prefix(&raw))?;
        let environment = env::var("APP_ENV")
            .map_or(Ok(Environment::Development), |raw| Environment::parse(&raw))?;
        Ok(Self {
            listen_port: port,
            api_prefix: prefix,
            environment,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_owned())),
    }
}

fn parse_prefix(raw: &str) -> Result<String, ConfigError> {
    if raw.starts_with('/') && raw.len() > 1 && !raw.ends_with('/') {
        Ok(raw.to_owned())
    } else {
        Err(ConfigError::InvalidPrefix(raw.to_owned()))
    }
}

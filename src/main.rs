//! Taskdesk service entry point.
//!
//! Wires the in-memory store, the task service, and the router together
//! with explicit constructor passing, then serves until a shutdown signal
//! drains in-flight requests.

use mockable::DefaultClock;
use std::process::ExitCode;
use std::sync::Arc;
use taskdesk::config::{AppConfig, ConfigError, Environment};
use taskdesk::http::{self, AppState};
use taskdesk::logging::{self, LoggingConfig, LoggingInitError};
use taskdesk::task::adapters::memory::InMemoryTaskRepository;
use taskdesk::task::services::TaskService;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Debug, Error)]
enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingInitError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(
                component = "bootstrap",
                operation = "main",
                error = %err,
                "failed to start service"
            );
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BootstrapError> {
    // The subscriber must be installed before a config error propagates,
    // or the failure would exit the process without a single log line.
    let parsed = AppConfig::from_env();
    logging::init(&LoggingConfig::from_env(logging_environment(&parsed)))?;
    let config = parsed?;

    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = TaskService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    let router = http::build_router(&config.api_prefix, AppState { service, repository });

    let listener = TcpListener::bind(("0.0.0.0", config.listen_port)).await?;
    info!(
        component = "bootstrap",
        operation = "run",
        port = config.listen_port,
        api_prefix = config.api_prefix.as_str(),
        "server listening"
    );
    info!(
        component = "bootstrap",
        operation = "run",
        "health probes available at /healthz and /ready"
    );

    http::serve(listener, router).await?;

    info!(
        component = "bootstrap",
        operation = "run",
        "cleanup finished, server shut down"
    );
    Ok(())
}

fn logging_environment(parsed: &Result<AppConfig, ConfigError>) -> Environment {
    parsed
        .as_ref()
        .map_or_else(|_| Environment::default(), |config| config.environment)
}

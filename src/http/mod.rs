//! HTTP surface for Taskdesk.
//!
//! The router mounts the CRUD routes under a configurable prefix, keeps
//! the health probes at the root so they stay reachable under load, and
//! wraps everything in the correlation middleware.

pub mod correlation;
pub mod dto;
pub mod error;
pub mod health;
pub mod state;
pub mod tasks;

#[cfg(test)]
mod tests;

pub use correlation::{CORRELATION_HEADER, CorrelationId};
pub use state::AppState;

use crate::task::ports::TaskRepository;
use axum::{
    Router, middleware,
    routing::get,
};
use mockable::Clock;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Builds the service router.
///
/// `prefix` is the API path prefix the CRUD routes live under (for
/// example `/api`); the health probes are deliberately outside it.
pub fn build_router<R, C>(prefix: &str, app_state: AppState<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_routes = Router::new()
        .route(
            "/",
            get(tasks::list_tasks::<R, C>).post(tasks::create_task::<R, C>),
        )
        .route(
            "/{id}",
            get(tasks::get_task::<R, C>)
                .put(tasks::update_task::<R, C>)
                .delete(tasks::delete_task::<R, C>),
        );

    Router::new()
        .nest(&format!("{prefix}/tasks"), task_routes)
        .route("/healthz", get(health::liveness))
        .route("/ready", get(health::readiness::<R, C>))
        .layer(middleware::from_fn(correlation::correlation_middleware))
        .with_state(app_state)
}

/// Serves the router until a shutdown signal arrives, then drains
/// in-flight requests before returning.
///
/// # Errors
///
/// Returns the underlying I/O error when the listener fails.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
}

/// Resolves when the process receives an interrupt or terminate signal.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(
                component = "http",
                operation = "shutdown",
                error = %err,
                "failed to install interrupt handler"
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(
                    component = "http",
                    operation = "shutdown",
                    error = %err,
                    "failed to install terminate handler"
                );
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }

    info!(
        component = "http",
        operation = "shutdown",
        "shutdown signal received, draining in-flight requests"
    );
}

//! Liveness and readiness probes.
//!
//! Liveness answers whenever the process can respond at all; readiness
//! additionally exercises the task store with a lightweight read. Neither
//! probe has side effects, and neither shares a lock with CRUD handling
//! beyond the store's own read lock.

use crate::http::correlation::CorrelationId;
use crate::http::state::AppState;
use crate::task::ports::TaskRepository;
use axum::{Json, extract::State, http::StatusCode};
use mockable::Clock;
use serde_json::{Value, json};
use tracing::error;

/// `GET /healthz` — process liveness, no dependency checks.
pub async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /ready` — readiness, verified against the task store.
pub async fn readiness<R, C>(
    State(state): State<AppState<R, C>>,
    correlation_id: CorrelationId,
) -> (StatusCode, Json<Value>)
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    match state.repository.find_all().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "repository": "connected" })),
        ),
        Err(err) => {
            error!(
                component = "health",
                operation = "readiness",
                correlation_id = %correlation_id,
                error = %err,
                "repository health check failed"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "repository": "disconnected" })),
            )
        }
    }
}

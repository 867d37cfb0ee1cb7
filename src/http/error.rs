//! Error translation from internal failure kinds to HTTP responses.
//!
//! Every route funnels failures through [`ApiError`] so the service has a
//! single response shape regardless of where a failure originated.
//! Validation and not-found failures are expected business outcomes and
//! never log above warning; anything else logs at error level with full
//! detail while the response body stays generic.

use crate::http::correlation::CorrelationId;
use crate::http::dto::FieldError;
use crate::task::services::TaskServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

/// Failure kinds surfaced to HTTP callers.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing required input, detected before any use-case
    /// call.
    Validation(Vec<FieldError>),
    /// The referenced task does not exist.
    NotFound(String),
    /// Unexpected internal failure; detail stays in the logs.
    Internal(String),
}

impl ApiError {
    /// Records a validation failure and converts it for the response.
    #[must_use]
    pub fn validation(
        correlation_id: &CorrelationId,
        operation: &'static str,
        problems: Vec<FieldError>,
    ) -> Self {
        warn!(
            component = "task_api",
            operation,
            correlation_id = %correlation_id,
            problem_count = problems.len(),
            "request validation failed"
        );
        Self::Validation(problems)
    }
}

/// Translates a use-case failure into an [`ApiError`], logging it with
/// the mandatory component/operation/correlation triple.
#[must_use]
pub fn translate(
    correlation_id: &CorrelationId,
    operation: &'static str,
    err: &TaskServiceError,
) -> ApiError {
    match err {
        TaskServiceError::NotFound(id) => {
            warn!(
                component = "task_api",
                operation,
                correlation_id = %correlation_id,
                task_id = %id,
                "task not found"
            );
            ApiError::NotFound("Task not found".to_owned())
        }
        TaskServiceError::Repository(repo_err) => {
            error!(
                component = "task_api",
                operation,
                correlation_id = %correlation_id,
                error = %repo_err,
                "repository operation failed"
            );
            ApiError::Internal(repo_err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(problems) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": problems })),
            )
                .into_response(),
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            // Internals are already in the logs; callers get a generic
            // message.
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal server error" })),
            )
                .into_response(),
        }
    }
}

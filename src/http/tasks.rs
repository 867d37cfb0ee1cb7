//! CRUD handlers for the task API.
//!
//! Each handler logs an operation-start event, validates the payload,
//! invokes the use-case layer, and logs the outcome. Identifiers are
//! opaque to callers, so a path segment that does not parse as an
//! identifier maps to 404 rather than 400: such a task cannot exist.

use crate::http::correlation::CorrelationId;
use crate::http::dto::{CreateTaskBody, TaskResponse, UpdateTaskBody};
use crate::http::error::{ApiError, translate};
use crate::http::state::AppState;
use crate::task::domain::TaskId;
use crate::task::ports::TaskRepository;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use mockable::Clock;
use tracing::{info, warn};

const COMPONENT: &str = "task_api";

fn parse_task_id(
    raw: &str,
    correlation_id: &CorrelationId,
    operation: &'static str,
) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| {
        // Same logging tier as every other not-found outcome.
        warn!(
            component = COMPONENT,
            operation,
            correlation_id = %correlation_id,
            task_id = raw,
            "malformed task identifier"
        );
        ApiError::NotFound("Task not found".to_owned())
    })
}

/// `GET /tasks` — lists every task.
pub async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    correlation_id: CorrelationId,
) -> Result<Json<Vec<TaskResponse>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    info!(
        component = COMPONENT,
        operation = "list_tasks",
        correlation_id = %correlation_id,
        method = "GET",
        "getting all tasks"
    );

    let tasks = state
        .service
        .list_tasks()
        .await
        .map_err(|err| translate(&correlation_id, "list_tasks", &err))?;

    info!(
        component = COMPONENT,
        operation = "list_tasks",
        correlation_id = %correlation_id,
        count = tasks.len(),
        "tasks retrieved successfully"
    );
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// `GET /tasks/{id}` — retrieves a single task.
pub async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    correlation_id: CorrelationId,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    info!(
        component = COMPONENT,
        operation = "get_task",
        correlation_id = %correlation_id,
        method = "GET",
        task_id = id.as_str(),
        "getting task by id"
    );

    let task_id = parse_task_id(&id, &correlation_id, "get_task")?;
    let task = state
        .service
        .get_task(task_id)
        .await
        .map_err(|err| translate(&correlation_id, "get_task", &err))?;

    info!(
        component = COMPONENT,
        operation = "get_task",
        correlation_id = %correlation_id,
        task_id = %task_id,
        "task retrieved successfully"
    );
    Ok(Json(TaskResponse::from(&task)))
}

/// `POST /tasks` — creates a task from a validated body.
pub async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    correlation_id: CorrelationId,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    info!(
        component = COMPONENT,
        operation = "create_task",
        correlation_id = %correlation_id,
        method = "POST",
        "creating new task"
    );

    let input = body
        .validate()
        .map_err(|problems| ApiError::validation(&correlation_id, "create_task", problems))?;
    let task = state
        .service
        .create_task(input.title, input.description)
        .await
        .map_err(|err| translate(&correlation_id, "create_task", &err))?;

    info!(
        component = COMPONENT,
        operation = "create_task",
        correlation_id = %correlation_id,
        task_id = %task.id(),
        "task created successfully"
    );
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// `PUT /tasks/{id}` — applies a partial update to a task.
pub async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    correlation_id: CorrelationId,
    Path(id): Path<String>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    info!(
        component = COMPONENT,
        operation = "update_task",
        correlation_id = %correlation_id,
        method = "PUT",
        task_id = id.as_str(),
        "updating task"
    );

    let task_id = parse_task_id(&id, &correlation_id, "update_task")?;
    let patch = body
        .validate()
        .map_err(|problems| ApiError::validation(&correlation_id, "update_task", problems))?;
    let task = state
        .service
        .update_task(task_id, &patch)
        .await
        .map_err(|err| translate(&correlation_id, "update_task", &err))?;

    info!(
        component = COMPONENT,
        operation = "update_task",
        correlation_id = %correlation_id,
        task_id = %task_id,
        "task updated successfully"
    );
    Ok(Json(TaskResponse::from(&task)))
}

/// `DELETE /tasks/{id}` — removes a task; terminal, no tombstones.
pub async fn delete_task<R, C>(
    State(state): State<AppState<R, C>>,
    correlation_id: CorrelationId,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    info!(
        component = COMPONENT,
        operation = "delete_task",
        correlation_id = %correlation_id,
        method = "DELETE",
        task_id = id.as_str(),
        "deleting task"
    );

    let task_id = parse_task_id(&id, &correlation_id, "delete_task")?;
    state
        .service
        .delete_task(task_id)
        .await
        .map_err(|err| translate(&correlation_id, "delete_task", &err))?;

    info!(
        component = COMPONENT,
        operation = "delete_task",
        correlation_id = %correlation_id,
        task_id = %task_id,
        "task deleted successfully"
    );
    Ok(StatusCode::NO_CONTENT)
}

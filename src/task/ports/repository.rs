//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations must serialise writes on the same task identifier so
/// that concurrent `save`/`update`/`delete_by_id` calls never corrupt the
/// backing store; last writer wins for genuinely concurrent writes.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every stored task.
    ///
    /// Order is stable within a single snapshot; the in-memory adapter
    /// returns insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backing
    /// medium fails.
    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist; absence is a normal
    /// outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backing
    /// medium fails.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Stores a task, inserting when the identifier is new and
    /// overwriting when it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backing
    /// medium fails; a well-formed task is otherwise always accepted.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// Unlike [`save`](TaskRepository::save), this refuses to resurrect a
    /// deleted task from a stale reference. Callers are expected to have
    /// confirmed existence already; the re-check is a deliberate
    /// invariant guard.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::Persistence`] when the backing
    /// medium fails.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task by identifier.
    ///
    /// Idempotent: absence of the identifier is not an error at this
    /// layer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backing
    /// medium fails.
    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

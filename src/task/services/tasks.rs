//! Use-case layer for task management.
//!
//! The service is the single authorised mutation path for tasks: the HTTP
//! handlers never construct or modify an entity themselves, and the
//! repository never decides business outcomes. Absence of a task becomes
//! the typed [`TaskServiceError::NotFound`] failure at this boundary.

use crate::task::{
    domain::{Task, TaskId, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors produced by task use-case operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The referenced task does not exist. A normal business outcome for
    /// caller-supplied identifiers, not a defect; carries no retry
    /// semantics.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The repository failed for a reason other than absence.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        // The store's update re-checks existence even though callers load
        // first; should that guard ever fire, it is still a NotFound to
        // the caller rather than an infrastructure fault.
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ TaskRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

/// Result type for task use-case operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

// Manual impl: cloning shares the Arcs and must not require R: Clone.
impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every stored task, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_all().await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not
    /// exist, or [`TaskServiceError::Repository`] when the store fails.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Creates and persists a new task.
    ///
    /// The task starts incomplete with a generated identifier and equal
    /// creation and update timestamps. Title validation has already
    /// happened at the boundary; valid input never fails here.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create_task(
        &self,
        title: impl Into<String> + Send,
        description: impl Into<String> + Send,
    ) -> TaskServiceResult<Task> {
        let task = Task::new(title, description, &*self.clock);
        self.repository.save(&task).await?;
        Ok(task)
    }

    /// Applies a partial update to an existing task.
    ///
    /// Only the fields present in the patch change; the update timestamp
    /// advances. The task is loaded first so absence fails fast before
    /// any mutation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not
    /// exist, or [`TaskServiceError::Repository`] when the store fails.
    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskServiceResult<Task> {
        let mut task = self.get_task(id).await?;
        task.apply(patch, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// The task is loaded first so that a missing identifier produces the
    /// NotFound signal; the removal itself is idempotent at the store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not
    /// exist, or [`TaskServiceError::Repository`] when the store fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        let task = self.get_task(id).await?;
        self.repository.delete_by_id(task.id()).await?;
        Ok(())
    }
}

//! Request and response payloads for the task API.
//!
//! Validation happens here, before any use-case call: a create needs a
//! non-empty title; an update accepts any subset of fields, with a
//! present title held to the same non-empty rule. Failures surface as a
//! structured list of field-level problems.

use crate::task::domain::{Task, TaskId, TaskPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a field-level problem report.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Body of a task creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskBody {
    /// Required task title.
    pub title: Option<String>,
    /// Optional task description; defaults to empty.
    pub description: Option<String>,
}

/// Validated task creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    /// Non-empty task title.
    pub title: String,
    /// Task description, possibly empty.
    pub description: String,
}

impl CreateTaskBody {
    /// Validates the body into creation input.
    ///
    /// # Errors
    ///
    /// Returns the list of field-level problems when the title is missing
    /// or empty after trimming.
    pub fn validate(self) -> Result<CreateTask, Vec<FieldError>> {
        match self.title {
            Some(title) if !title.trim().is_empty() => Ok(CreateTask {
                title,
                description: self.description.unwrap_or_default(),
            }),
            Some(_) => Err(vec![FieldError::new("title", "title must not be empty")]),
            None => Err(vec![FieldError::new("title", "title is required")]),
        }
    }
}

/// Body of a task update request; any subset of fields may be present.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskBody {
    /// Replacement title, when supplied.
    pub title: Option<String>,
    /// Replacement description, when supplied. An empty string is applied
    /// verbatim.
    pub description: Option<String>,
    /// Replacement completion flag, when supplied.
    pub completed: Option<bool>,
}

impl UpdateTaskBody {
    /// Validates the body into a partial update.
    ///
    /// Absent fields stay untouched downstream; a present-but-empty
    /// description is still applied, while a present-but-empty title is
    /// rejected because the title invariant holds at this boundary.
    ///
    /// # Errors
    ///
    /// Returns the list of field-level problems when a supplied title is
    /// empty after trimming.
    pub fn validate(self) -> Result<TaskPatch, Vec<FieldError>> {
        if self.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(vec![FieldError::new("title", "title must not be empty")]);
        }
        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            completed: self.completed,
        })
    }
}

/// Wire representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp, ISO-8601.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp, ISO-8601.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            completed: task.completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

//! Task aggregate root and partial-update description.

use super::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Invariants upheld here: `id` and `created_at` never change after
/// construction, and `updated_at` advances on every mutation so that
/// `updated_at >= created_at` always holds. Title validation happens at
/// the HTTP boundary, not in the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial update applied to an existing task.
///
/// `None` fields are left untouched; `Some` fields are applied verbatim,
/// including present-but-empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title, when supplied.
    pub title: Option<String>,
    /// Replacement description, when supplied.
    pub description: Option<String>,
    /// Replacement completion flag, when supplied.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Returns `true` when the patch carries no field changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

impl Task {
    /// Creates a new task with a generated identifier.
    ///
    /// The task starts incomplete with both timestamps set to the current
    /// clock time.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the task has been completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update, advancing `updated_at`.
    ///
    /// Fields absent from the patch retain their prior values. An empty
    /// patch still counts as a mutation and refreshes the timestamp.
    pub fn apply(&mut self, patch: &TaskPatch, clock: &impl Clock) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

//! Domain model for task management.
//!
//! The domain owns the `Task` aggregate and its identifier while keeping
//! all infrastructure concerns outside of the domain boundary. Input
//! validation lives at the HTTP edge; the entity only guarantees its own
//! timestamp and identity invariants.

mod ids;
mod task;

pub use ids::TaskId;
pub use task::{Task, TaskPatch};

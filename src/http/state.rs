//! Shared handler state.

use crate::task::ports::TaskRepository;
use crate::task::services::TaskService;
use mockable::Clock;
use std::sync::Arc;

/// Dependencies shared by every handler.
///
/// Built once at startup with concrete instances supplied by the owner;
/// there is no reflective container. The repository appears twice on
/// purpose: the service owns business access, while the readiness probe
/// reads the store directly.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Task use-case layer.
    pub service: TaskService<R, C>,
    /// Store handle for the readiness probe.
    pub repository: Arc<R>,
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            repository: Arc::clone(&self.repository),
        }
    }
}

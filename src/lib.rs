//! Taskdesk: a layered task-management HTTP service.
//!
//! This crate exposes a small CRUD API over a single `Task` entity, with
//! per-request correlation identifiers and structured logging throughout.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: the `Task` aggregate with no infrastructure dependencies
//! - **Ports**: the swappable persistence contract
//! - **Adapters**: the in-memory reference store
//! - **Services**: the use-case layer owning every entity mutation
//! - **HTTP**: controllers, correlation middleware, error translation,
//!   and health probes
//!
//! # Modules
//!
//! - [`task`]: entity, store port, in-memory store, and orchestration
//! - [`http`]: router, handlers, middleware, and probes
//! - [`config`]: startup configuration
//! - [`logging`]: explicitly constructed logging context

pub mod config;
pub mod http;
pub mod logging;
pub mod task;

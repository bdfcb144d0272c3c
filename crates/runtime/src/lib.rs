//! Async runtime hosting Iconic module instances.
//!
//! This crate wires the pure orchestrator from `iconic-core` and the dataset
//! store from `iconic-content` into a single-writer worker task. Consumers
//! build a [`Runtime`], drive modules through the cloneable
//! [`RuntimeHandle`], and subscribe to [`Event`]s by topic.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the builder and lifecycle
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{ModuleHost, ModuleStatus, Result, RuntimeError, RuntimeHandle};
pub use events::{DataEvent, Event, EventBus, ModuleEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};

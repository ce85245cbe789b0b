//! Async runtime around the ability engine.
//!
//! The runtime owns the [`shelter_core::WorldState`] and the
//! [`shelter_core::AbilityEngine`] inside a single worker task. Clients talk to
//! it through the cloneable [`RuntimeHandle`], subscribe to execution and
//! ability events on the [`EventBus`], and publish world events that the
//! passive dispatcher turns into passive executions.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle, WorldUpdate};
pub use events::{Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};

//! Worker tasks that back the runtime orchestration.
//!
//! The ability worker owns the engine and the world and executes commands one
//! at a time. The dispatcher forwards world events from the bus into the
//! worker's queue.

mod ability;
mod dispatcher;

pub use ability::{AbilityWorker, Command};
pub use dispatcher::PassiveDispatcher;

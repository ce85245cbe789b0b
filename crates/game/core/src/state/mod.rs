//! World state consumed by the ability engine.
//!
//! These types are the engine-facing view of the shelter: the tenant roster,
//! rooms, the shared resource ledger and the loose path-addressed values other
//! subsystems publish. The engine mutates them only through effect handlers and
//! the cost calculator.
mod actor;
mod ledger;
mod room;
mod store;
mod world;

pub use actor::Actor;
pub use ledger::{LedgerEntry, LedgerError, ResourceKind, ResourceLedger};
pub use room::Room;
pub use store::{StateError, StateStore};
pub use world::WorldState;

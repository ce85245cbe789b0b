//! Traits describing read-only inputs to the engine.
//!
//! Oracles expose the ability catalog and the random source. Both are injected
//! into [`crate::engine::AbilityEngine`] at construction time so hosts and tests
//! can swap them without touching engine code.
mod abilities;
mod rng;

pub use abilities::{AbilityOracle, StaticAbilityOracle};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed, hash_key};

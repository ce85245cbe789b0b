//! Data-driven ability content and loaders.
//!
//! This crate houses the shipped ability catalog and loaders for TOML data
//! files:
//! - Ability catalogs (`abilities.toml`), grouped by actor type
//! - Engine configuration (`config.toml`)
//!
//! Content is consumed by the engine through [`shelter_core::AbilityOracle`]
//! and never appears in engine state.

pub mod catalog;
pub mod loaders;

pub use catalog::{AbilityCatalog, ActorAbilities};
pub use loaders::{AbilityLoader, ConfigLoader, ContentFactory, LoadResult};

//! Deterministic ability execution engine for the shelter simulation.
//!
//! `shelter-core` registers per-actor-type abilities, validates and pays for
//! their use, applies their effects to the shared world state, tracks
//! cooldowns and usage, and fires passive abilities off world events. It owns
//! no threads and performs no I/O; [`engine::AbilityEngine`] borrows the
//! [`state::WorldState`] for each call.
pub mod ability;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod execute;
pub mod ids;
pub mod state;

pub use ability::{
    AbilityCategory, AbilityDefinition, AbilityRegistry, Condition, Cooldown, Cost,
    EffectDescriptor, EffectKind, RegistryError, RegistrySource, TargetSelector,
};
pub use config::EngineConfig;
pub use engine::{AbilityEngine, AbilityEngineBuilder, AnnotatedAbility, DayReport, EngineSnapshot, SnapshotError};
pub use env::{AbilityOracle, FixedRng, PcgRng, RngOracle, StaticAbilityOracle};
pub use error::{ErrorSeverity, GameError};
pub use events::{AbilityEvent, WorldEvent};
pub use execute::{
    EffectResult, EffectStatus, ExecuteOptions, ExecutionRecord, ExecutionResult, ReasonCode,
};
pub use ids::{AbilityId, ActorId, ExecutionId, RoomId};
pub use state::{Actor, ResourceKind, ResourceLedger, Room, WorldState};

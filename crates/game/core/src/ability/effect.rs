//! Effect descriptors: the atomic mutations an ability performs.
//!
//! Descriptors are pure data loaded from the catalog. Each variant is applied
//! by the handler registered for its [`EffectKind`]; see
//! [`crate::execute::EffectHandlerRegistry`].

use serde_json::Value;

use crate::ids::{ActorId, RoomId};
use crate::state::ResourceKind;

/// Which actor an effect addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSelector {
    /// The actor executing the ability.
    Caster,

    /// The first incapacitated actor in roster order.
    #[default]
    FirstIncapacitated,

    /// A specific actor.
    Actor(ActorId),
}

/// One atomic effect, tagged by `kind` in configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectDescriptor {
    // ========================================================================
    // Ledger & State
    // ========================================================================
    /// Add (or remove, when negative) resources from the shelter ledger.
    ResourceDelta { resource: ResourceKind, amount: i64 },

    /// Write a value at a state path.
    SetState { path: String, value: Value },

    /// Add a number to the value at a state path.
    AdjustState { path: String, delta: f64 },

    // ========================================================================
    // Actors & Rooms
    // ========================================================================
    /// Cure the target's infection.
    Heal {
        #[serde(default)]
        target: TargetSelector,
    },

    /// Raise a room's condition. Without a room, the most damaged one.
    Repair {
        #[serde(default)]
        room: Option<RoomId>,
        amount: u32,
    },

    /// Raise a room's defense. Without a room, the least defended one.
    Reinforce {
        #[serde(default)]
        room: Option<RoomId>,
        amount: u32,
    },

    /// Scan the roster for infections, optionally revealing them.
    DetectInfection {
        #[serde(default)]
        reveal: bool,
    },

    // ========================================================================
    // Narrative & Scheduling
    // ========================================================================
    /// Emit a log line for the player.
    Log { message: String },

    /// Apply `effect` after `days` days.
    Delayed {
        days: u32,
        effect: Box<EffectDescriptor>,
    },

    // ========================================================================
    // Cross-system requests (emitted as events, never applied directly)
    // ========================================================================
    /// Ask the tenant-lifecycle layer to remove an actor.
    RequestRemoval {
        #[serde(default)]
        target: TargetSelector,
        reason: String,
    },

    /// Ask the tenant-lifecycle layer to raise satisfaction.
    ImproveSatisfaction { amount: i32 },

    /// Any kind this build does not recognise.
    #[serde(other)]
    Unknown,
}

/// Discriminant of [`EffectDescriptor`], used as the handler registry key.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    ResourceDelta,
    SetState,
    AdjustState,
    Heal,
    Repair,
    Reinforce,
    DetectInfection,
    Log,
    Delayed,
    RequestRemoval,
    ImproveSatisfaction,
    Unknown,
}

impl EffectDescriptor {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::ResourceDelta { .. } => EffectKind::ResourceDelta,
            Self::SetState { .. } => EffectKind::SetState,
            Self::AdjustState { .. } => EffectKind::AdjustState,
            Self::Heal { .. } => EffectKind::Heal,
            Self::Repair { .. } => EffectKind::Repair,
            Self::Reinforce { .. } => EffectKind::Reinforce,
            Self::DetectInfection { .. } => EffectKind::DetectInfection,
            Self::Log { .. } => EffectKind::Log,
            Self::Delayed { .. } => EffectKind::Delayed,
            Self::RequestRemoval { .. } => EffectKind::RequestRemoval,
            Self::ImproveSatisfaction { .. } => EffectKind::ImproveSatisfaction,
            Self::Unknown => EffectKind::Unknown,
        }
    }

    pub fn heal(target: TargetSelector) -> Self {
        Self::Heal { target }
    }

    pub fn resource_delta(resource: ResourceKind, amount: i64) -> Self {
        Self::ResourceDelta { resource, amount }
    }

    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }

    pub fn delayed(days: u32, effect: EffectDescriptor) -> Self {
        Self::Delayed {
            days,
            effect: Box::new(effect),
        }
    }
}

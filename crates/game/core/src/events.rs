//! Events crossing the engine boundary.
//!
//! [`AbilityEvent`]s are produced by executions and published by the host.
//! [`WorldEvent`]s are produced by the surrounding game and feed the passive
//! dispatcher.

use crate::ids::{AbilityId, ActorId, ExecutionId, RoomId};

// ============================================================================
// Ability Events (outbound)
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AbilityEvent {
    /// Emitted last for every execution that ran.
    AbilityExecuted {
        execution_id: ExecutionId,
        actor: ActorId,
        ability: AbilityId,
        day: u32,
        passive: bool,
    },

    ActiveAbilityUsed {
        actor: ActorId,
        ability: AbilityId,
    },

    PassiveAbilityTriggered {
        actor: ActorId,
        ability: AbilityId,
        trigger: Option<String>,
    },

    SpecialAbilityUsed {
        actor: ActorId,
        ability: AbilityId,
        /// One-time-permanent ability; it will not be usable again.
        permanent: bool,
    },

    ActorHealed {
        target: ActorId,
        healer: ActorId,
    },

    RoomRepaired {
        room: RoomId,
        amount: u32,
        condition: u32,
    },

    RoomReinforced {
        room: RoomId,
        amount: u32,
        defense: u32,
    },

    ActorRemovalRequested {
        target: ActorId,
        requested_by: ActorId,
        reason: String,
    },

    SatisfactionImproved {
        source: ActorId,
        amount: i32,
    },

    InfectionDetected {
        detector: ActorId,
        count: u32,
    },

    InfectionRevealed {
        actor: ActorId,
        detector: ActorId,
    },

    AbilityLog {
        actor: ActorId,
        ability: AbilityId,
        message: String,
    },
}

impl AbilityEvent {
    /// Stable snake_case name, e.g. `actor_healed`.
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}

// ============================================================================
// World Events (inbound)
// ============================================================================

/// World happenings that may fire passive abilities.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldEvent {
    DayAdvanced { day: u32 },
    HarvestCompleted,
    ScavengeStarted,
    ActorHired { actor: ActorId },
    ActorRemoved { actor: ActorId },
    /// Generic state change carrying its own trigger name.
    StateChanged { trigger: String },
}

impl WorldEvent {
    pub const DAILY_CYCLE: &'static str = "daily_cycle";
    pub const HARVEST_COMPLETED: &'static str = "harvest_completed";
    pub const SCAVENGE_STARTED: &'static str = "scavenge_started";
    pub const ACTOR_HIRED: &'static str = "actor_hired";
    pub const ACTOR_REMOVED: &'static str = "actor_removed";

    /// Trigger name matched against `trigger` requirements.
    pub fn trigger_name(&self) -> &str {
        match self {
            Self::DayAdvanced { .. } => Self::DAILY_CYCLE,
            Self::HarvestCompleted => Self::HARVEST_COMPLETED,
            Self::ScavengeStarted => Self::SCAVENGE_STARTED,
            Self::ActorHired { .. } => Self::ACTOR_HIRED,
            Self::ActorRemoved { .. } => Self::ACTOR_REMOVED,
            Self::StateChanged { trigger } => trigger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_names() {
        assert_eq!(WorldEvent::DayAdvanced { day: 3 }.trigger_name(), "daily_cycle");
        assert_eq!(
            WorldEvent::StateChanged { trigger: "generator_failed".into() }.trigger_name(),
            "generator_failed"
        );
    }

    #[test]
    fn event_names_are_snake_case() {
        let event = AbilityEvent::ActorHealed {
            target: "Bob".into(),
            healer: "Doc".into(),
        };
        assert_eq!(event.name(), "actor_healed");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "actor_healed");
    }
}

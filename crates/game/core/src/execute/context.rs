use crate::ids::{AbilityId, ActorId, ExecutionId};

/// Caller-supplied knobs for one execution.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExecuteOptions {
    /// Name of the world event that caused this execution, if any.
    pub trigger: Option<String>,

    /// Set by the passive dispatcher.
    pub passive: bool,
}

impl ExecuteOptions {
    /// Explicit invocation by the player or AI.
    pub fn explicit() -> Self {
        Self::default()
    }

    /// Explicit invocation that still satisfies `trigger` requirements.
    pub fn triggered(trigger: impl Into<String>) -> Self {
        Self {
            trigger: Some(trigger.into()),
            passive: false,
        }
    }

    /// Reactive invocation from the passive dispatcher.
    pub fn passive(trigger: impl Into<String>) -> Self {
        Self {
            trigger: Some(trigger.into()),
            passive: true,
        }
    }
}

/// Position of an execution in game time.
///
/// `sequence` is engine-global and strictly increasing, so timestamps are
/// totally ordered even within a day.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Timestamp {
    pub day: u32,
    pub sequence: u64,
}

/// Everything known about one execution attempt before it runs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionContext {
    pub execution_id: ExecutionId,
    pub actor: ActorId,
    pub ability: AbilityId,
    pub trigger: Option<String>,
    pub passive: bool,
    pub timestamp: Timestamp,
}

impl ExecutionContext {
    pub fn new(
        sequence: u64,
        day: u32,
        actor: ActorId,
        ability: AbilityId,
        options: ExecuteOptions,
    ) -> Self {
        Self {
            execution_id: ExecutionId(sequence),
            actor,
            ability,
            trigger: options.trigger,
            passive: options.passive,
            timestamp: Timestamp { day, sequence },
        }
    }

    pub fn day(&self) -> u32 {
        self.timestamp.day
    }

    pub fn trigger(&self) -> Option<&str> {
        self.trigger.as_deref()
    }

    /// Ledger journal reason for changes made on behalf of this execution.
    pub fn ledger_reason(&self) -> String {
        format!("{}:{}:{}", self.ability, self.actor, self.execution_id)
    }
}

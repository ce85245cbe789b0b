//! Engine snapshots for the save/load collaborator.
//!
//! A snapshot holds only the engine's dynamic bookkeeping. The registry and
//! handlers come from configuration and are rebuilt on load.

use std::collections::BTreeMap;

use crate::engine::AbilityEngine;
use crate::error::{ErrorSeverity, GameError};
use crate::execute::{
    CooldownEntry, CooldownLedger, EffectSchedule, ExecutionHistory, UsageEntry, UsageLedger,
};
use crate::ids::AbilityId;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to encode engine snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode engine snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "SNAPSHOT_ENCODE",
            Self::Decode(_) => "SNAPSHOT_DECODE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineSnapshot {
    pub sequence: u64,
    pub cooldowns: Vec<CooldownEntry>,
    pub usage: Vec<UsageEntry>,
    pub history: ExecutionHistory,
    pub schedule: EffectSchedule,
    #[serde(default)]
    pub passive_occurrences: BTreeMap<AbilityId, u64>,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Decode)
    }
}

impl AbilityEngine {
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            sequence: self.sequence,
            cooldowns: self.cooldowns.entries(),
            usage: self.usage.entries(),
            history: self.history.clone(),
            schedule: self.schedule.clone(),
            passive_occurrences: self.passive_occurrences.clone(),
        }
    }

    /// Replaces all dynamic state with `snapshot`.
    ///
    /// The history is trimmed to the configured capacity.
    pub fn restore(&mut self, snapshot: EngineSnapshot) {
        let EngineSnapshot {
            sequence,
            cooldowns,
            usage,
            mut history,
            schedule,
            passive_occurrences,
        } = snapshot;

        history.set_capacity(self.config.history_capacity);
        self.sequence = sequence;
        self.cooldowns = CooldownLedger::from_entries(cooldowns);
        self.usage = UsageLedger::from_entries(usage);
        self.history = history;
        self.schedule = schedule;
        self.passive_occurrences = passive_occurrences;
    }
}

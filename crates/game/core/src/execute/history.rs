//! Bounded audit trail of executions.

use std::collections::VecDeque;

use crate::execute::{EffectResult, ExecutionResult, ReasonCode};
use crate::ids::{AbilityId, ActorId, ExecutionId};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionRecord {
    pub execution_id: ExecutionId,
    pub actor: ActorId,
    pub ability: AbilityId,
    pub day: u32,
    pub passive: bool,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonCode>,
    pub effects: Vec<EffectResult>,
}

impl From<&ExecutionResult> for ExecutionRecord {
    fn from(result: &ExecutionResult) -> Self {
        Self {
            execution_id: result.execution_id,
            actor: result.actor.clone(),
            ability: result.ability.clone(),
            day: result.day,
            passive: result.passive,
            success: result.success,
            reason: result.reason,
            effects: result.effects.clone(),
        }
    }
}

/// Ring buffer of [`ExecutionRecord`]s with FIFO eviction.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionHistory {
    capacity: usize,
    records: VecDeque<ExecutionRecord>,
}

impl ExecutionHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a record, returning the evicted oldest one when full.
    pub fn push(&mut self, record: ExecutionRecord) -> Option<ExecutionRecord> {
        if self.capacity == 0 {
            return Some(record);
        }
        let evicted = if self.records.len() >= self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Changes the capacity, evicting the oldest records if it shrank.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.records.len() > capacity {
            self.records.pop_front();
        }
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ExecutionRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&ExecutionRecord> {
        self.records.back()
    }

    pub fn for_actor<'a>(&'a self, actor: &'a ActorId) -> impl Iterator<Item = &'a ExecutionRecord> {
        self.records.iter().filter(move |record| &record.actor == actor)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u64) -> ExecutionRecord {
        ExecutionRecord {
            execution_id: ExecutionId(n),
            actor: "X".into(),
            ability: "a".into(),
            day: 1,
            passive: false,
            success: true,
            reason: None,
            effects: Vec::new(),
        }
    }

    #[test]
    fn evicts_oldest_first() {
        let mut history = ExecutionHistory::with_capacity(3);
        for n in 1..=3 {
            assert!(history.push(record(n)).is_none());
        }

        let evicted = history.push(record(4)).unwrap();

        assert_eq!(evicted.execution_id, ExecutionId(1));
        let ids: Vec<_> = history.iter().map(|r| r.execution_id.0).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        assert_eq!(history.latest().unwrap().execution_id, ExecutionId(4));
    }

    #[test]
    fn shrinking_capacity_trims_from_front() {
        let mut history = ExecutionHistory::with_capacity(5);
        (1..=5).for_each(|n| {
            history.push(record(n));
        });
        history.set_capacity(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().next().unwrap().execution_id, ExecutionId(4));
    }
}

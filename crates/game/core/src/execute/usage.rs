use std::collections::BTreeMap;

use crate::ids::{AbilityId, ActorId};

/// Persisted form of one usage counter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UsageEntry {
    pub actor: ActorId,
    pub ability: AbilityId,
    pub count: u32,
}

/// Lifetime count of successful executions per (actor, ability).
///
/// Backs `max_uses` limits and one-time-permanent abilities, and is never
/// reset by day advances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsageLedger {
    counts: BTreeMap<(ActorId, AbilityId), u32>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = UsageEntry>) -> Self {
        Self {
            counts: entries
                .into_iter()
                .map(|entry| ((entry.actor, entry.ability), entry.count))
                .collect(),
        }
    }

    pub fn entries(&self) -> Vec<UsageEntry> {
        self.counts
            .iter()
            .map(|((actor, ability), &count)| UsageEntry {
                actor: actor.clone(),
                ability: ability.clone(),
                count,
            })
            .collect()
    }

    pub fn count(&self, actor: &ActorId, ability: &AbilityId) -> u32 {
        self.counts
            .get(&(actor.clone(), ability.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Records one use and returns the new count.
    pub fn increment(&mut self, actor: &ActorId, ability: &AbilityId) -> u32 {
        let count = self
            .counts
            .entry((actor.clone(), ability.clone()))
            .or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Uses left under `max_uses`, or `None` when unlimited.
    pub fn remaining(&self, actor: &ActorId, ability: &AbilityId, max_uses: Option<u32>) -> Option<u32> {
        max_uses.map(|max| max.saturating_sub(self.count(actor, ability)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_per_actor_and_ability() {
        let mut usage = UsageLedger::new();
        let doc = ActorId::from("Doc");
        let heal = AbilityId::from("heal");

        assert_eq!(usage.increment(&doc, &heal), 1);
        assert_eq!(usage.increment(&doc, &heal), 2);
        assert_eq!(usage.count(&"Ann".into(), &heal), 0);
        assert_eq!(usage.remaining(&doc, &heal, Some(3)), Some(1));
        assert_eq!(usage.remaining(&doc, &heal, Some(1)), Some(0));
        assert_eq!(usage.remaining(&doc, &heal, None), None);
        assert_eq!(UsageLedger::from_entries(usage.entries()), usage);
    }
}

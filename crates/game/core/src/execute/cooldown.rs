//! Day-indexed cooldown tracking.

use std::collections::BTreeMap;

use crate::ids::{AbilityId, ActorId};

/// One pending cooldown, in the shape the save layer persists.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CooldownEntry {
    pub actor: ActorId,
    pub ability: AbilityId,
    /// First day on which the ability is usable again.
    pub expires_on: u32,
}

/// At most one entry per (actor, ability); a new cooldown overwrites the old.
///
/// An entry is live while `day < expires_on` and is pruned lazily by
/// [`CooldownLedger::is_on_cooldown`] and eagerly by
/// [`CooldownLedger::advance_day`]. The engine calls `is_on_cooldown` for the
/// candidate before validation; validators only read [`CooldownLedger::remaining`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CooldownLedger {
    entries: BTreeMap<(ActorId, AbilityId), u32>,
}

impl CooldownLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CooldownEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| ((entry.actor, entry.ability), entry.expires_on))
                .collect(),
        }
    }

    pub fn entries(&self) -> Vec<CooldownEntry> {
        self.entries
            .iter()
            .map(|((actor, ability), &expires_on)| CooldownEntry {
                actor: actor.clone(),
                ability: ability.clone(),
                expires_on,
            })
            .collect()
    }

    /// Starts a cooldown of `days` from `day`. Non-positive lengths are no-ops.
    pub fn set_cooldown(&mut self, actor: &ActorId, ability: &AbilityId, days: i32, day: u32) {
        if days <= 0 {
            return;
        }
        let expires_on = day.saturating_add(days as u32);
        self.entries
            .insert((actor.clone(), ability.clone()), expires_on);
    }

    /// Checks the cooldown, removing the entry if it has expired.
    pub fn is_on_cooldown(&mut self, actor: &ActorId, ability: &AbilityId, day: u32) -> bool {
        let key = (actor.clone(), ability.clone());
        match self.entries.get(&key) {
            Some(&expires_on) if day < expires_on => true,
            Some(_) => {
                self.entries.remove(&key);
                false
            }
            None => false,
        }
    }

    /// Days left before the ability is usable again; zero when not cooling down.
    pub fn remaining(&self, actor: &ActorId, ability: &AbilityId, day: u32) -> u32 {
        self.expiry(actor, ability)
            .map_or(0, |expires_on| expires_on.saturating_sub(day))
    }

    pub fn expiry(&self, actor: &ActorId, ability: &AbilityId) -> Option<u32> {
        self.entries
            .get(&(actor.clone(), ability.clone()))
            .copied()
    }

    /// Drops every entry expired as of `day`. Returns how many were removed.
    pub fn advance_day(&mut self, day: u32) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, expires_on| day < *expires_on);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_is_live_until_expiry_day() {
        let mut ledger = CooldownLedger::new();
        let (actor, ability) = (ActorId::from("X"), AbilityId::from("fortify"));

        ledger.set_cooldown(&actor, &ability, 3, 10);

        assert_eq!(ledger.expiry(&actor, &ability), Some(13));
        for day in 10..13 {
            assert!(ledger.is_on_cooldown(&actor, &ability, day), "day {day}");
        }
        assert_eq!(ledger.remaining(&actor, &ability, 12), 1);
        assert!(!ledger.is_on_cooldown(&actor, &ability, 13));
        assert!(ledger.is_empty(), "expired entry is pruned on read");
        assert!(!ledger.is_on_cooldown(&actor, &ability, 14));
    }

    #[test]
    fn non_positive_lengths_do_not_create_entries() {
        let mut ledger = CooldownLedger::new();
        ledger.set_cooldown(&"X".into(), &"a".into(), 0, 1);
        ledger.set_cooldown(&"X".into(), &"b".into(), -1, 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn newer_cooldown_overwrites_older_entry() {
        let mut ledger = CooldownLedger::new();
        let (actor, ability) = (ActorId::from("X"), AbilityId::from("a"));
        ledger.set_cooldown(&actor, &ability, 5, 1);
        ledger.set_cooldown(&actor, &ability, 1, 2);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.expiry(&actor, &ability), Some(3));
    }

    #[test]
    fn advance_day_sweeps_expired_entries() {
        let mut ledger = CooldownLedger::new();
        ledger.set_cooldown(&"X".into(), &"a".into(), 1, 1);
        ledger.set_cooldown(&"X".into(), &"b".into(), 4, 1);

        assert_eq!(ledger.advance_day(2), 1);
        assert_eq!(ledger.entries().len(), 1);
        assert_eq!(ledger.entries()[0].ability, "b");

        let restored = CooldownLedger::from_entries(ledger.entries());
        assert_eq!(restored, ledger);
    }
}

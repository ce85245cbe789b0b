//! Shared resource ledger.
//!
//! The ledger holds the shelter's pooled resources. Every change goes through
//! [`ResourceLedger::modify`], which refuses to drive a balance negative and
//! appends a journal entry naming the reason.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};

// ============================================================================
// Resource Kind
// ============================================================================

/// Resource types tracked by the shelter.
///
/// Used in ability costs, resource-delta effects and personal pools.
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
    strum::EnumString,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    Cash,
    Food,
    Water,
    Medical,
    Materials,
    Fuel,
}

// ============================================================================
// Ledger
// ============================================================================

/// One recorded change to a ledger balance.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LedgerEntry {
    pub resource: ResourceKind,
    pub delta: i64,
    pub reason: String,
}

/// Errors raised by ledger mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("not enough {resource}: requested {requested}, available {available}")]
    Insufficient {
        resource: ResourceKind,
        requested: i64,
        available: i64,
    },
}

impl GameError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Insufficient { .. } => "LEDGER_INSUFFICIENT",
        }
    }
}

/// Pooled shelter resources with an append-only journal.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceLedger {
    balances: BTreeMap<ResourceKind, i64>,
    #[serde(default)]
    journal: Vec<LedgerEntry>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a starting balance without journaling it.
    pub fn with_balance(mut self, resource: ResourceKind, amount: i64) -> Self {
        self.balances.insert(resource, amount);
        self
    }

    pub fn balance(&self, resource: ResourceKind) -> i64 {
        self.balances.get(&resource).copied().unwrap_or(0)
    }

    pub fn balances(&self) -> &BTreeMap<ResourceKind, i64> {
        &self.balances
    }

    /// Returns true when at least `amount` of `resource` is available.
    pub fn has_enough(&self, resource: ResourceKind, amount: i64) -> bool {
        self.balance(resource) >= amount
    }

    /// Applies `delta` to `resource`, returning the new balance.
    ///
    /// A change that would leave the balance negative is rejected and nothing
    /// is recorded.
    pub fn modify(
        &mut self,
        resource: ResourceKind,
        delta: i64,
        reason: impl Into<String>,
    ) -> Result<i64, LedgerError> {
        let available = self.balance(resource);
        let next = available + delta;
        if next < 0 {
            return Err(LedgerError::Insufficient {
                resource,
                requested: -delta,
                available,
            });
        }

        self.balances.insert(resource, next);
        self.journal.push(LedgerEntry {
            resource,
            delta,
            reason: reason.into(),
        });
        Ok(next)
    }

    /// All journaled changes, oldest first.
    pub fn journal(&self) -> &[LedgerEntry] {
        &self.journal
    }

    /// Net journaled change for one resource.
    pub fn net_change(&self, resource: ResourceKind) -> i64 {
        self.journal
            .iter()
            .filter(|entry| entry.resource == resource)
            .map(|entry| entry.delta)
            .sum()
    }

    /// Removes and returns the journal, e.g. after the save layer flushed it.
    pub fn drain_journal(&mut self) -> Vec<LedgerEntry> {
        std::mem::take(&mut self.journal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modify_rejects_overdraft_without_journaling() {
        let mut ledger = ResourceLedger::new().with_balance(ResourceKind::Food, 4);

        let err = ledger
            .modify(ResourceKind::Food, -5, "feast")
            .expect_err("overdraft must fail");
        assert_eq!(
            err,
            LedgerError::Insufficient {
                resource: ResourceKind::Food,
                requested: 5,
                available: 4,
            }
        );
        assert_eq!(ledger.balance(ResourceKind::Food), 4);
        assert!(ledger.journal().is_empty());
    }

    #[test]
    fn modify_journals_reason_and_tracks_net_change() {
        let mut ledger = ResourceLedger::new().with_balance(ResourceKind::Cash, 10);
        ledger.modify(ResourceKind::Cash, -3, "rent").unwrap();
        ledger.modify(ResourceKind::Cash, 7, "trade").unwrap();

        assert_eq!(ledger.balance(ResourceKind::Cash), 14);
        assert_eq!(ledger.net_change(ResourceKind::Cash), 4);
        assert_eq!(ledger.journal()[0].reason, "rent");
        assert!(ledger.has_enough(ResourceKind::Cash, 14));
        assert!(!ledger.has_enough(ResourceKind::Cash, 15));
    }

    #[test]
    fn resource_kind_parses_snake_case() {
        use std::str::FromStr;
        assert_eq!(ResourceKind::from_str("medical").unwrap(), ResourceKind::Medical);
        assert_eq!(ResourceKind::Materials.to_string(), "materials");
    }
}

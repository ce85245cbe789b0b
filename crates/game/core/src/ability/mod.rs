//! Ability definitions and the registry that indexes them.
//!
//! An ability is pure configuration: a cost, an ordered effect list, a
//! cooldown and a set of requirements. Definitions are immutable after load and
//! owned by [`AbilityRegistry`]; everything that changes over time (cooldowns,
//! usage counts, history) lives in the engine.

mod condition;
mod cost;
mod effect;
pub mod fallback;
mod registry;

pub use condition::{Condition, ConditionContext, first_unmet};
pub use cost::Cost;
pub use effect::{EffectDescriptor, EffectKind, TargetSelector};
pub use registry::{AbilityRegistry, RegistryError, RegistrySource};

use crate::ids::AbilityId;
use crate::state::ResourceKind;

// ============================================================================
// Category
// ============================================================================

/// How an ability is invoked; selects the executor.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AbilityCategory {
    /// Explicitly invoked by the player or AI.
    Active,
    /// Fired by world events through the passive dispatcher.
    Passive,
    /// Explicitly invoked, usually rare or one-time.
    Special,
}

// ============================================================================
// Cooldown
// ============================================================================

/// Reuse restriction in days.
///
/// - `0`: no cooldown
/// - `n > 0`: unavailable for `n` days after use
/// - `-1`: one-time-permanent, tracked through the usage ledger
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Cooldown(pub i32);

impl Cooldown {
    pub const NONE: Self = Self(0);
    pub const PERMANENT: Self = Self(-1);

    /// Cooldown length in days, if this is a day-based cooldown.
    pub fn days(self) -> Option<u32> {
        (self.0 > 0).then_some(self.0 as u32)
    }

    pub fn is_permanent(self) -> bool {
        self == Self::PERMANENT
    }

    pub fn is_valid(self) -> bool {
        self.0 >= -1
    }
}

// ============================================================================
// Definition
// ============================================================================

/// A configured capability with cost, effects, cooldown and requirements.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AbilityDefinition {
    pub id: AbilityId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub category: AbilityCategory,

    #[serde(default)]
    pub cost: Cost,

    /// Applied strictly in declared order.
    #[serde(default)]
    pub effects: Vec<EffectDescriptor>,

    #[serde(default)]
    pub cooldown: Cooldown,

    /// Lifetime cap on successful uses per actor.
    #[serde(default)]
    pub max_uses: Option<u32>,

    /// All must hold.
    #[serde(default)]
    pub requirements: Vec<Condition>,
}

impl AbilityDefinition {
    pub fn new(id: impl Into<AbilityId>, name: impl Into<String>, category: AbilityCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            cost: Cost::new(),
            effects: Vec::new(),
            cooldown: Cooldown::NONE,
            max_uses: None,
            requirements: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cost(mut self, resource: ResourceKind, amount: u32) -> Self {
        self.cost = self.cost.with(resource, amount);
        self
    }

    pub fn with_effect(mut self, effect: EffectDescriptor) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_cooldown(mut self, days: i32) -> Self {
        self.cooldown = Cooldown(days);
        self
    }

    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    pub fn with_requirement(mut self, condition: Condition) -> Self {
        self.requirements.push(condition);
        self
    }

    pub fn is_passive(&self) -> bool {
        self.category == AbilityCategory::Passive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_sentinels() {
        assert_eq!(Cooldown(3).days(), Some(3));
        assert_eq!(Cooldown::NONE.days(), None);
        assert_eq!(Cooldown::PERMANENT.days(), None);
        assert!(Cooldown::PERMANENT.is_permanent());
        assert!(!Cooldown(-2).is_valid());
    }

    #[test]
    fn definition_deserializes_with_defaults() {
        let ability: AbilityDefinition = serde_json::from_str(
            r#"{
                "id": "heal_infection",
                "name": "Heal Infection",
                "category": "active",
                "cost": { "medical": 3, "cash": 12 },
                "effects": [{ "kind": "heal" }]
            }"#,
        )
        .unwrap();

        assert_eq!(ability.cost.get(ResourceKind::Cash), 12);
        assert_eq!(ability.cooldown, Cooldown::NONE);
        assert!(ability.requirements.is_empty());
        assert_eq!(ability.effects.len(), 1);
    }
}

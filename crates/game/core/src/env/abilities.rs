use std::collections::BTreeMap;

use crate::ability::AbilityDefinition;

/// Oracle providing ability definitions grouped by actor type.
///
/// This is the configuration collaborator. It does NOT hold dynamic state;
/// cooldowns and usage live in the engine, actors live in the world.
pub trait AbilityOracle: Send + Sync {
    /// Actor types that have an ability list, in stable order.
    fn actor_types(&self) -> Vec<String>;

    /// Ability definitions declared for `actor_type` (empty if unknown).
    fn abilities_for(&self, actor_type: &str) -> Vec<AbilityDefinition>;
}

/// In-memory oracle, mostly for tests and embedding hosts.
#[derive(Clone, Debug, Default)]
pub struct StaticAbilityOracle {
    by_type: BTreeMap<String, Vec<AbilityDefinition>>,
}

impl StaticAbilityOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abilities(
        mut self,
        actor_type: impl Into<String>,
        abilities: Vec<AbilityDefinition>,
    ) -> Self {
        self.by_type
            .entry(actor_type.into())
            .or_default()
            .extend(abilities);
        self
    }
}

impl AbilityOracle for StaticAbilityOracle {
    fn actor_types(&self) -> Vec<String> {
        self.by_type.keys().cloned().collect()
    }

    fn abilities_for(&self, actor_type: &str) -> Vec<AbilityDefinition> {
        self.by_type.get(actor_type).cloned().unwrap_or_default()
    }
}

//! Ability catalog: the TOML document shape and its oracle implementation.

use serde::{Deserialize, Serialize};
use shelter_core::{AbilityDefinition, AbilityOracle};

/// The catalog compiled into the binary.
const EMBEDDED: &str = include_str!("../data/abilities.toml");

/// Abilities granted to one actor type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorAbilities {
    #[serde(rename = "type")]
    pub actor_type: String,

    #[serde(default)]
    pub abilities: Vec<AbilityDefinition>,
}

/// Parsed ability catalog.
///
/// ```toml
/// [[actor]]
/// type = "doctor"
///
/// [[actor.abilities]]
/// id = "heal_infection"
/// name = "Heal Infection"
/// category = "active"
/// cost = { medical = 3, cash = 12 }
/// effects = [{ kind = "heal" }]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityCatalog {
    #[serde(default, rename = "actor")]
    pub actors: Vec<ActorAbilities>,
}

impl AbilityCatalog {
    /// Parses a catalog from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The catalog shipped with the crate.
    pub fn embedded() -> Result<Self, toml::de::Error> {
        Self::from_toml(EMBEDDED)
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Total number of ability definitions across all actor types.
    pub fn ability_count(&self) -> usize {
        self.actors.iter().map(|entry| entry.abilities.len()).sum()
    }
}

impl AbilityOracle for AbilityCatalog {
    fn actor_types(&self) -> Vec<String> {
        self.actors
            .iter()
            .map(|entry| entry.actor_type.clone())
            .collect()
    }

    fn abilities_for(&self, actor_type: &str) -> Vec<AbilityDefinition> {
        self.actors
            .iter()
            .filter(|entry| entry.actor_type == actor_type)
            .flat_map(|entry| entry.abilities.iter().cloned())
            .collect()
    }
}

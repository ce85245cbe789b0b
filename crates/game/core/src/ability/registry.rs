//! Ability registry: loads and indexes definitions by actor type.

use std::collections::{BTreeMap, HashMap};

use tracing::{info, warn};

use crate::ability::{AbilityDefinition, Condition, fallback};
use crate::config::EngineConfig;
use crate::env::AbilityOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::ids::AbilityId;

/// Errors raised while building a registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The configuration declared no actor types at all.
    #[error("ability configuration is missing or empty")]
    MissingConfiguration,

    /// Two definitions share an id.
    #[error("ability `{id}` declared for both `{first}` and `{second}`")]
    DuplicateAbility {
        id: AbilityId,
        first: String,
        second: String,
    },

    /// Cooldown below the `-1` sentinel.
    #[error("ability `{id}` has invalid cooldown {value}")]
    InvalidCooldown { id: AbilityId, value: i32 },

    /// Chance condition outside `0.0..=1.0`.
    #[error("ability `{id}` has a chance requirement outside 0..=1")]
    InvalidProbability { id: AbilityId },
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingConfiguration => "REGISTRY_MISSING_CONFIGURATION",
            Self::DuplicateAbility { .. } => "REGISTRY_DUPLICATE_ABILITY",
            Self::InvalidCooldown { .. } => "REGISTRY_INVALID_COOLDOWN",
            Self::InvalidProbability { .. } => "REGISTRY_INVALID_PROBABILITY",
        }
    }
}

/// Where the registry's definitions came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrySource {
    Catalog,
    Fallback,
    Empty,
}

/// Immutable index of ability definitions.
#[derive(Clone, Debug)]
pub struct AbilityRegistry {
    definitions: Vec<AbilityDefinition>,
    by_id: HashMap<AbilityId, usize>,
    by_type: BTreeMap<String, Vec<usize>>,
    source: RegistrySource,
}

impl AbilityRegistry {
    /// Registry with no abilities.
    pub fn empty() -> Self {
        Self {
            definitions: Vec::new(),
            by_id: HashMap::new(),
            by_type: BTreeMap::new(),
            source: RegistrySource::Empty,
        }
    }

    /// Loads every actor type's abilities from the configuration oracle.
    ///
    /// Fails fast on missing configuration, duplicate ids, or malformed
    /// cooldowns and probabilities.
    pub fn load(oracle: &dyn AbilityOracle) -> Result<Self, RegistryError> {
        let actor_types = oracle.actor_types();
        if actor_types.is_empty() {
            return Err(RegistryError::MissingConfiguration);
        }

        let groups = actor_types.into_iter().map(|actor_type| {
            let abilities = oracle.abilities_for(&actor_type);
            (actor_type, abilities)
        });
        Self::from_groups(groups, RegistrySource::Catalog)
    }

    /// Loads from `oracle`, or from the built-in fallback table when the
    /// oracle is absent or its content is rejected.
    pub fn load_or_fallback(oracle: Option<&dyn AbilityOracle>) -> Self {
        let loaded = match oracle {
            Some(oracle) => Self::load(oracle),
            None => Err(RegistryError::MissingConfiguration),
        };

        match loaded {
            Ok(registry) => {
                info!(
                    target: "engine::registry",
                    abilities = registry.len(),
                    actor_types = registry.by_type.len(),
                    "Ability catalog loaded"
                );
                registry
            }
            Err(error) => {
                warn!(
                    target: "engine::registry",
                    error = %error,
                    code = error.error_code(),
                    "Ability catalog unusable, using fallback table"
                );
                Self::fallback()
            }
        }
    }

    /// Loads according to [`EngineConfig::fallback_on_missing_catalog`].
    ///
    /// With fallback disabled, a missing catalog yields an empty registry and
    /// a malformed one is returned as an error.
    pub fn load_with(
        oracle: Option<&dyn AbilityOracle>,
        config: &EngineConfig,
    ) -> Result<Self, RegistryError> {
        if config.fallback_on_missing_catalog {
            return Ok(Self::load_or_fallback(oracle));
        }

        match oracle {
            Some(oracle) => Self::load(oracle),
            None => {
                warn!(
                    target: "engine::registry",
                    "No ability catalog and fallback disabled, starting empty"
                );
                Ok(Self::empty())
            }
        }
    }

    /// Registry built from [`fallback::fallback_table`].
    pub fn fallback() -> Self {
        let mut registry = Self::empty();
        for (actor_type, abilities) in fallback::fallback_table() {
            for ability in abilities {
                // The fallback table is static and validated by its own tests.
                let _ = registry.insert(actor_type.to_string(), ability);
            }
        }
        registry.source = RegistrySource::Fallback;
        registry
    }

    /// Builds a registry from `(actor_type, abilities)` groups.
    pub fn from_groups(
        groups: impl IntoIterator<Item = (String, Vec<AbilityDefinition>)>,
        source: RegistrySource,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::empty();
        registry.source = source;
        for (actor_type, abilities) in groups {
            registry.by_type.entry(actor_type.clone()).or_default();
            for ability in abilities {
                registry.insert(actor_type.clone(), ability)?;
            }
        }
        Ok(registry)
    }

    fn insert(&mut self, actor_type: String, ability: AbilityDefinition) -> Result<(), RegistryError> {
        Self::check(&ability)?;

        if let Some(&existing) = self.by_id.get(&ability.id) {
            let first = self
                .owner_of(existing)
                .unwrap_or_default()
                .to_string();
            return Err(RegistryError::DuplicateAbility {
                id: ability.id,
                first,
                second: actor_type,
            });
        }

        let index = self.definitions.len();
        self.by_id.insert(ability.id.clone(), index);
        self.by_type.entry(actor_type).or_default().push(index);
        self.definitions.push(ability);
        Ok(())
    }

    fn check(ability: &AbilityDefinition) -> Result<(), RegistryError> {
        if !ability.cooldown.is_valid() {
            return Err(RegistryError::InvalidCooldown {
                id: ability.id.clone(),
                value: ability.cooldown.0,
            });
        }

        let bad_probability = ability.requirements.iter().any(|condition| {
            matches!(condition, Condition::Chance { probability } if !(0.0..=1.0).contains(probability))
        });
        if bad_probability {
            return Err(RegistryError::InvalidProbability {
                id: ability.id.clone(),
            });
        }

        Ok(())
    }

    fn owner_of(&self, index: usize) -> Option<&str> {
        self.by_type
            .iter()
            .find(|(_, indices)| indices.contains(&index))
            .map(|(actor_type, _)| actor_type.as_str())
    }

    /// Abilities declared for `actor_type`, in catalog order.
    pub fn abilities_for(&self, actor_type: &str) -> Vec<&AbilityDefinition> {
        self.by_type
            .get(actor_type)
            .map(|indices| indices.iter().map(|&i| &self.definitions[i]).collect())
            .unwrap_or_default()
    }

    /// Looks up a definition by id regardless of actor type.
    pub fn get(&self, id: &AbilityId) -> Option<&AbilityDefinition> {
        self.by_id.get(id).map(|&i| &self.definitions[i])
    }

    /// Looks up a definition only if it is granted to `actor_type`.
    pub fn granted(&self, actor_type: &str, id: &AbilityId) -> Option<&AbilityDefinition> {
        let index = *self.by_id.get(id)?;
        self.by_type
            .get(actor_type)
            .filter(|indices| indices.contains(&index))
            .map(|_| &self.definitions[index])
    }

    pub fn actor_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_type.keys().map(String::as_str)
    }

    pub fn source(&self) -> RegistrySource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

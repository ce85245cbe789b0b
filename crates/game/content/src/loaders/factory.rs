//! Content factory for building the engine's inputs from a data directory.

use std::path::{Path, PathBuf};

use shelter_core::{AbilityRegistry, EngineConfig};
use tracing::warn;

use crate::catalog::AbilityCatalog;
use crate::loaders::{AbilityLoader, ConfigLoader, LoadResult};

/// Content factory that loads ability content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── abilities.toml
/// └── config.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const ABILITIES_FILE: &'static str = "abilities.toml";
    pub const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load engine configuration, or defaults when `config.toml` is absent.
    pub fn load_config_or_default(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the ability catalog from `abilities.toml`.
    pub fn load_abilities(&self) -> LoadResult<AbilityCatalog> {
        AbilityLoader::load(&self.data_dir.join(Self::ABILITIES_FILE))
    }

    /// Build a registry from `abilities.toml`.
    ///
    /// A missing or unparsable catalog is logged and handed to the registry as
    /// absent, which then applies the config's fallback policy.
    pub fn build_registry(&self, config: &EngineConfig) -> LoadResult<AbilityRegistry> {
        let catalog = match self.load_abilities() {
            Ok(catalog) => Some(catalog),
            Err(error) => {
                warn!(
                    target: "content::factory",
                    data_dir = %self.data_dir.display(),
                    error = %error,
                    "Ability catalog unavailable"
                );
                None
            }
        };

        let oracle = catalog
            .as_ref()
            .map(|catalog| catalog as &dyn shelter_core::AbilityOracle);
        Ok(AbilityRegistry::load_with(oracle, config)?)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

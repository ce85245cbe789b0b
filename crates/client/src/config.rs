//! Simulation driver configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration for one simulation run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Ability catalog TOML. Embedded catalog when unset.
    pub abilities_path: Option<PathBuf>,
    /// Engine config TOML. Defaults when unset.
    pub config_path: Option<PathBuf>,
    pub days: u32,
    /// Overrides the game seed from the engine config.
    pub seed: Option<u64>,
    /// Also write logs to `shelter-sim.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            abilities_path: None,
            config_path: None,
            days: 7,
            seed: None,
            log_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHELTER_ABILITIES` - Ability catalog TOML (default: embedded catalog)
    /// - `SHELTER_CONFIG` - Engine config TOML (default: built-in defaults)
    /// - `SHELTER_DAYS` - Days to simulate (default: 7)
    /// - `SHELTER_SEED` - Game seed (default: config value)
    /// - `SHELTER_LOG_DIR` - Directory for a log file (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.abilities_path = env::var("SHELTER_ABILITIES").ok().map(PathBuf::from);
        config.config_path = env::var("SHELTER_CONFIG").ok().map(PathBuf::from);

        if let Some(days) = read_env::<u32>("SHELTER_DAYS") {
            config.days = days.max(1);
        }

        config.seed = read_env::<u64>("SHELTER_SEED");
        config.log_dir = env::var("SHELTER_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

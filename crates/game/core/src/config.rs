/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of execution records kept in the audit ring buffer.
    pub history_capacity: usize,

    /// Base seed for probability conditions. Same seed, same rolls.
    pub game_seed: u64,

    /// Use the built-in fallback ability table when the catalog is missing.
    /// When false, a missing catalog leaves the engine with no abilities.
    pub fallback_on_missing_catalog: bool,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HISTORY_CAPACITY: usize = 100;
    pub const DEFAULT_GAME_SEED: u64 = 0x5eed_0f_5e1_7e5;

    /// Message shown to players when execution fails for internal reasons.
    pub const ANOMALY_MESSAGE: &'static str = "system processing anomaly";

    pub fn new() -> Self {
        Self {
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
            game_seed: Self::DEFAULT_GAME_SEED,
            fallback_on_missing_catalog: true,
        }
    }

    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }

    pub fn with_seed(mut self, game_seed: u64) -> Self {
        self.game_seed = game_seed;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

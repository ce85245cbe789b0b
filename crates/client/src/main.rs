//! Headless shelter simulation driver.
//!
//! Loads the ability catalog and engine config, starts the runtime, and plays
//! a scripted shelter for a number of days while logging every execution.
mod config;
mod demo;

use anyhow::Result;
use shelter_content::{AbilityCatalog, AbilityLoader, ConfigLoader};
use shelter_core::EngineConfig;
use shelter_runtime::{Runtime, RuntimeConfig};
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::SimConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = setup_logging(&config)?;

    let engine_config = load_engine_config(&config)?;
    let catalog = load_catalog(&config);

    let mut builder = Runtime::builder()
        .config(RuntimeConfig {
            engine: engine_config.clone(),
            ..RuntimeConfig::default()
        })
        .world(demo::initial_world());
    if let Some(catalog) = catalog {
        builder = builder.oracle(catalog);
    }
    let runtime = builder.build().await?;

    demo::run(&runtime, config.days, engine_config.game_seed).await?;

    runtime.shutdown().await?;
    Ok(())
}

fn load_engine_config(config: &SimConfig) -> Result<EngineConfig> {
    let mut engine = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = config.seed {
        engine.game_seed = seed;
    }
    Ok(engine)
}

/// Catalog from `SHELTER_ABILITIES` or the embedded one. `None` lets the
/// registry apply its fallback policy.
fn load_catalog(config: &SimConfig) -> Option<AbilityCatalog> {
    let loaded = match &config.abilities_path {
        Some(path) => AbilityLoader::load(path),
        None => AbilityCatalog::embedded().map_err(anyhow::Error::from),
    };

    match loaded {
        Ok(catalog) => Some(catalog),
        Err(error) => {
            warn!(error = %error, "Ability catalog could not be loaded");
            None
        }
    }
}

/// Setup logging to stderr and, when configured, to a file.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(
    config: &SimConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let Some(log_dir) = &config.log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, "shelter-sim.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/shelter-sim.log", log_dir.display());
    Ok(Some(guard))
}

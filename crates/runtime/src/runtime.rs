//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the engine.

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use shelter_core::{
    AbilityEngine, AbilityOracle, AbilityRegistry, EngineConfig, RngOracle, WorldState,
};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{AbilityWorker, Command, PassiveDispatcher};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    /// Broadcast capacity of the execution and ability topics.
    pub event_buffer_size: usize,
    /// Broadcast capacity of the world topic.
    ///
    /// The passive dispatcher reads world events from this buffer. If it falls
    /// further behind than this, the oldest world events are dropped with a
    /// warning and their passives never fire.
    pub world_event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Run the passive dispatcher task (default: true)
    pub dispatch_world_events: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            event_buffer_size: 100,
            world_event_buffer_size: 1024,
            command_buffer_size: 32,
            dispatch_world_events: true,
        }
    }
}

/// Running dispatcher task and its shutdown signal.
struct DispatcherTask {
    handle: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
}

/// Main runtime that orchestrates the ability engine
///
/// Runtime owns workers and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
    dispatcher: Option<DispatcherTask>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events on `topic`
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Stops the dispatcher, then waits for the worker to drain its queue.
    /// Handles cloned from this runtime keep the worker alive until dropped.
    pub async fn shutdown(self) -> Result<()> {
        if let Some(dispatcher) = self.dispatcher {
            let _ = dispatcher.shutdown_tx.send(true);
            dispatcher.handle.await.map_err(RuntimeError::WorkerJoin)?;
        }

        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        info!(target: "runtime", "Runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<WorldState>,
    oracle: Option<Box<dyn AbilityOracle>>,
    registry: Option<AbilityRegistry>,
    engine: Option<AbilityEngine>,
    rng: Option<Box<dyn RngOracle>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            oracle: None,
            registry: None,
            engine: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial world state (default: empty world on day 1)
    pub fn world(mut self, world: WorldState) -> Self {
        self.world = Some(world);
        self
    }

    /// Ability catalog to build the registry from.
    pub fn oracle(mut self, oracle: impl AbilityOracle + 'static) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    /// Use an already-built registry instead of loading from an oracle.
    pub fn registry(mut self, registry: AbilityRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Use a fully configured engine. Overrides `oracle`, `registry` and `rng`.
    pub fn engine(mut self, engine: AbilityEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Random source for chance requirements.
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    fn build_engine(
        engine: Option<AbilityEngine>,
        registry: Option<AbilityRegistry>,
        oracle: Option<Box<dyn AbilityOracle>>,
        rng: Option<Box<dyn RngOracle>>,
        config: &EngineConfig,
    ) -> Result<AbilityEngine> {
        if let Some(engine) = engine {
            return Ok(engine);
        }

        let registry = match registry {
            Some(registry) => registry,
            None => AbilityRegistry::load_with(oracle.as_deref(), config)?,
        };

        let builder = AbilityEngine::builder(registry).config(config.clone());
        Ok(match rng {
            Some(rng) => builder.boxed_rng(rng).build(),
            None => builder.build(),
        })
    }

    /// Build the runtime and spawn its workers
    pub async fn build(self) -> Result<Runtime> {
        let engine = Self::build_engine(
            self.engine,
            self.registry,
            self.oracle,
            self.rng,
            &self.config.engine,
        )?;
        let world = self.world.unwrap_or_else(|| WorldState::new(1));

        info!(
            target: "runtime",
            abilities = engine.registry().len(),
            source = ?engine.registry().source(),
            day = world.day,
            actors = world.actors.len(),
            "Starting ability runtime"
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_topic_capacities(|topic| match topic {
            Topic::World => self.config.world_event_buffer_size,
            Topic::Execution | Topic::Ability => self.config.event_buffer_size,
        });

        // Subscribe before spawning the worker so no world event is missed.
        let dispatcher = self.config.dispatch_world_events.then(|| {
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let dispatcher = PassiveDispatcher::new(&event_bus, command_tx.clone(), shutdown_rx);
            let handle = tokio::spawn(async move {
                dispatcher.run().await;
            });
            DispatcherTask {
                handle,
                shutdown_tx,
            }
        });

        let worker = AbilityWorker::new(engine, world, command_rx, event_bus.clone());
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            worker_handle,
            dispatcher,
        })
    }
}

//! Ability worker that owns the authoritative [`WorldState`] and engine.
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them against
//! [`AbilityEngine`], and publishes results to the [`EventBus`].
//!
//! The command queue is the exclusive execution section: a command runs to
//! completion before the next one is received, so no two executions ever
//! observe the same pre-payment balance.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use shelter_core::{
    AbilityEngine, AbilityId, ActorId, AnnotatedAbility, DayReport, EngineSnapshot,
    ExecuteOptions, ExecutionRecord, ExecutionResult, WorldEvent, WorldState,
};

use crate::api::WorldUpdate;
use crate::events::{Event, EventBus};

/// Commands that can be sent to the ability worker
pub enum Command {
    /// Execute one ability.
    Execute {
        actor: ActorId,
        ability: AbilityId,
        options: ExecuteOptions,
        reply: oneshot::Sender<ExecutionResult>,
    },
    /// List an actor's non-passive abilities with availability annotations.
    Available {
        actor: ActorId,
        reply: oneshot::Sender<Vec<AnnotatedAbility>>,
    },
    /// Fire passives for a world event. The reply is optional so the
    /// dispatcher can enqueue without waiting.
    Dispatch {
        event: WorldEvent,
        reply: Option<oneshot::Sender<Vec<ExecutionResult>>>,
    },
    /// Advance the world by one day.
    AdvanceDay { reply: oneshot::Sender<DayReport> },
    /// Apply an external mutation (tenant lifecycle, economy, ...).
    UpdateWorld {
        update: WorldUpdate,
        reply: oneshot::Sender<()>,
    },
    /// Query the current world state (read-only clone).
    QueryWorld { reply: oneshot::Sender<WorldState> },
    /// Query the execution history, oldest first.
    History {
        reply: oneshot::Sender<Vec<ExecutionRecord>>,
    },
    /// Capture the engine's dynamic state.
    Snapshot { reply: oneshot::Sender<EngineSnapshot> },
    /// Replace the engine's dynamic state.
    Restore {
        snapshot: Box<EngineSnapshot>,
        reply: oneshot::Sender<()>,
    },
}

/// Background task that processes ability commands.
pub struct AbilityWorker {
    engine: AbilityEngine,
    world: WorldState,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl AbilityWorker {
    /// Creates a new ability worker.
    pub fn new(
        engine: AbilityEngine,
        world: WorldState,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            engine,
            world,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Exits once every command sender is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", "Ability worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute {
                actor,
                ability,
                options,
                reply,
            } => {
                let result = self
                    .engine
                    .execute_ability(&mut self.world, &actor, &ability, options);
                self.publish_result(&result);
                let _ = reply.send(result);
            }
            Command::Available { actor, reply } => {
                let _ = reply.send(self.engine.available_abilities(&self.world, &actor));
            }
            Command::Dispatch { event, reply } => {
                let results = self.dispatch(&event);
                if let Some(reply) = reply {
                    let _ = reply.send(results);
                }
            }
            Command::AdvanceDay { reply } => {
                let report = self.advance_day();
                let _ = reply.send(report);
            }
            Command::UpdateWorld { update, reply } => {
                update(&mut self.world);
                let _ = reply.send(());
            }
            Command::QueryWorld { reply } => {
                let _ = reply.send(self.world.clone());
            }
            Command::History { reply } => {
                let records = self.engine.history().iter().cloned().collect();
                let _ = reply.send(records);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.engine.snapshot());
            }
            Command::Restore { snapshot, reply } => {
                self.engine.restore(*snapshot);
                info!(target: "runtime::worker", "Engine state restored from snapshot");
                let _ = reply.send(());
            }
        }
    }

    fn dispatch(&mut self, event: &WorldEvent) -> Vec<ExecutionResult> {
        let results = self.engine.dispatch_passives(&mut self.world, event);
        for result in &results {
            self.publish_result(result);
        }
        results
    }

    fn advance_day(&mut self) -> DayReport {
        let report = self.engine.advance_day(&mut self.world);

        for event in &report.events {
            self.event_bus.publish(Event::Ability(event.clone()));
        }
        self.event_bus.publish(Event::DayCompleted(report.clone()));
        self.event_bus.publish(Event::World(WorldEvent::DayAdvanced { day: report.day }));

        report
    }

    fn publish_result(&self, result: &ExecutionResult) {
        if !result.success {
            debug!(
                target: "runtime::worker",
                execution_id = %result.execution_id,
                actor = %result.actor,
                ability = %result.ability,
                reason = ?result.reason,
                message = %result.message,
                "Ability execution rejected"
            );
        }

        for event in &result.events {
            self.event_bus.publish(Event::Ability(event.clone()));
        }
        self.event_bus
            .publish(Event::Execution(Box::new(result.clone())));
    }
}

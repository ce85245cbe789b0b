//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! executing abilities, advancing days, or streaming events from specific
//! topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use shelter_core::{
    AbilityId, ActorId, AnnotatedAbility, DayReport, EngineSnapshot, ExecuteOptions,
    ExecutionRecord, ExecutionResult, WorldEvent, WorldState,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// External mutation applied to the world inside the worker.
pub type WorldUpdate = Box<dyn FnOnce(&mut WorldState) + Send>;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Execute an ability explicitly.
    ///
    /// Validation failures are not errors: they come back as an
    /// [`ExecutionResult`] with `success == false` and a reason code.
    pub async fn execute_ability(
        &self,
        actor: impl Into<ActorId>,
        ability: impl Into<AbilityId>,
        options: ExecuteOptions,
    ) -> Result<ExecutionResult> {
        let (actor, ability) = (actor.into(), ability.into());
        self.request(|reply| Command::Execute {
            actor,
            ability,
            options,
            reply,
        })
        .await
    }

    /// List an actor's non-passive abilities with availability annotations.
    pub async fn available_abilities(
        &self,
        actor: impl Into<ActorId>,
    ) -> Result<Vec<AnnotatedAbility>> {
        let actor = actor.into();
        self.request(|reply| Command::Available { actor, reply })
            .await
    }

    /// Fire passives for `event` and wait for their results.
    ///
    /// Bypasses the bus: the event is not published on [`Topic::World`].
    pub async fn dispatch(&self, event: WorldEvent) -> Result<Vec<ExecutionResult>> {
        self.request(|reply| Command::Dispatch {
            event,
            reply: Some(reply),
        })
        .await
    }

    /// Publish a world event on the bus. The passive dispatcher picks it up
    /// and results arrive on [`Topic::Execution`].
    pub fn publish_world_event(&self, event: WorldEvent) {
        self.event_bus.publish(Event::World(event));
    }

    /// Advance the world by one day.
    ///
    /// Publishes `DayAdvanced` afterwards, which fires `daily_cycle` passives
    /// through the dispatcher.
    pub async fn advance_day(&self) -> Result<DayReport> {
        self.request(|reply| Command::AdvanceDay { reply }).await
    }

    /// Apply a mutation to the world between executions.
    pub async fn update_world(
        &self,
        update: impl FnOnce(&mut WorldState) + Send + 'static,
    ) -> Result<()> {
        let update: WorldUpdate = Box::new(update);
        self.request(|reply| Command::UpdateWorld { update, reply })
            .await
    }

    /// Query the current world state (read-only snapshot)
    pub async fn query_world(&self) -> Result<WorldState> {
        self.request(|reply| Command::QueryWorld { reply }).await
    }

    /// Execution history, oldest first.
    pub async fn history(&self) -> Result<Vec<ExecutionRecord>> {
        self.request(|reply| Command::History { reply }).await
    }

    /// Capture the engine's cooldowns, usage, history and schedule.
    pub async fn snapshot(&self) -> Result<EngineSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Decode and restore a JSON snapshot produced by [`Self::snapshot`].
    pub async fn restore_json(&self, json: &str) -> Result<()> {
        let snapshot = EngineSnapshot::from_json(json)?;
        self.restore(snapshot).await
    }

    pub async fn restore(&self, snapshot: EngineSnapshot) -> Result<()> {
        let snapshot = Box::new(snapshot);
        self.request(|reply| Command::Restore { snapshot, reply })
            .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Execution` - One result per execution
    /// - `Topic::Ability` - Domain events (heals, repairs, logs, ...)
    /// - `Topic::World` - World events and day summaries
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

//! Passive dispatcher task.
//!
//! Listens on [`Topic::World`] and enqueues one [`Command::Dispatch`] per world
//! event. Matching passives then run inside the ability worker, in the same
//! exclusive section as explicit executions.

use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, warn};

use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Background task forwarding world events to the ability worker.
pub struct PassiveDispatcher {
    events_rx: broadcast::Receiver<Event>,
    command_tx: mpsc::Sender<Command>,
    shutdown_rx: watch::Receiver<bool>,
}

impl PassiveDispatcher {
    pub fn new(
        event_bus: &EventBus,
        command_tx: mpsc::Sender<Command>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            events_rx: event_bus.subscribe(Topic::World),
            command_tx,
            shutdown_rx,
        }
    }

    /// Main loop. Exits on shutdown, when the bus closes, or when the worker
    /// stops accepting commands.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                _ = self.shutdown_rx.changed() => break,
                received = self.events_rx.recv() => match received {
                    Ok(Event::World(event)) => {
                        debug!(
                            target: "runtime::dispatcher",
                            trigger = event.trigger_name(),
                            "Forwarding world event"
                        );
                        let command = Command::Dispatch { event, reply: None };
                        if self.command_tx.send(command).await.is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(
                            target: "runtime::dispatcher",
                            skipped,
                            "Dispatcher lagged behind the world topic, events dropped"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        debug!(target: "runtime::dispatcher", "Passive dispatcher stopped");
    }
}

//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use shelter_core::{AbilityEvent, DayReport, ExecutionResult, WorldEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// One result per ability execution, successful or not
    Execution,
    /// Domain events emitted by executors and effect handlers
    Ability,
    /// World happenings and day transitions
    World,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Execution, Topic::Ability, Topic::World];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Execution(Box<ExecutionResult>),
    Ability(AbilityEvent),

    /// Inbound world event. The passive dispatcher listens for these.
    World(WorldEvent),

    /// Summary of a completed day transition.
    DayCompleted(DayReport),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Execution(_) => Topic::Execution,
            Event::Ability(_) => Topic::Ability,
            Event::World(_) | Event::DayCompleted(_) => Topic::World,
        }
    }
}

/// Topic-based event bus
///
/// Channels for every topic are created up front and never change, so
/// subscribing and publishing need no locking.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_topic_capacities(|_| capacity)
    }

    /// Creates a new event bus sizing each topic's ring buffer separately.
    ///
    /// A receiver that falls more than the capacity behind loses the oldest
    /// events on that topic.
    pub fn with_topic_capacities(capacity: impl Fn(Topic) -> usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity(topic).max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    fn sender(&self, topic: Topic) -> Option<&broadcast::Sender<Event>> {
        self.channels.get(&topic)
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.sender(topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.sender(topic) {
            Some(tx) => tx.subscribe(),
            // Unreachable while every topic is created in the constructor.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of live subscribers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).map_or(0, |tx| tx.receiver_count())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut world_rx = bus.subscribe(Topic::World);
        let mut ability_rx = bus.subscribe(Topic::Ability);

        bus.publish(Event::World(WorldEvent::HarvestCompleted));

        let Event::World(event) = world_rx.recv().await.unwrap() else {
            panic!("expected world event");
        };
        assert_eq!(event, WorldEvent::HarvestCompleted);
        assert!(ability_rx.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(Topic::Execution), 0);
        bus.publish(Event::World(WorldEvent::ScavengeStarted));
    }

    #[test]
    fn topics_can_be_sized_separately() {
        let bus = EventBus::with_topic_capacities(|topic| match topic {
            Topic::World => 64,
            _ => 4,
        });
        let mut world_rx = bus.subscribe(Topic::World);
        let mut ability_rx = bus.subscribe(Topic::Ability);

        for _ in 0..32 {
            bus.publish(Event::World(WorldEvent::HarvestCompleted));
            bus.publish(Event::Ability(AbilityEvent::SatisfactionImproved {
                source: "Fay".into(),
                amount: 1,
            }));
        }

        assert!(matches!(world_rx.try_recv(), Ok(Event::World(_))));
        assert_eq!(world_rx.len(), 31);
        assert!(matches!(
            ability_rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(28))
        ));
    }

    #[test]
    fn day_reports_route_to_world_topic() {
        let event = Event::DayCompleted(DayReport::default());
        assert_eq!(event.topic(), Topic::World);
    }
}

//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{DataEvent, ModuleEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Puzzle progress, selections, strikes, solves
    Module,
    /// Dataset installation and remote reconciliation
    Data,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Module(ModuleEvent),
    Data(DataEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Module(_) => Topic::Module,
            Event::Data(_) => Topic::Data,
        }
    }
}

/// Topic-based event bus
///
/// Each topic has its own broadcast channel, so a slow subscriber on one
/// topic never lags another.
#[derive(Clone)]
pub struct EventBus {
    module: broadcast::Sender<Event>,
    data: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            module: broadcast::channel(capacity).0,
            data: broadcast::channel(capacity).0,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Module => &self.module,
            Topic::Data => &self.data,
        }
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
    async fn events_are_routed_by_topic() {
        let bus = EventBus::new();
        let mut module_rx = bus.subscribe(Topic::Module);
        let mut data_rx = bus.subscribe(Topic::Data);

        bus.publish(Event::Module(ModuleEvent::Strike { module_id: 3 }));

        assert_eq!(
            module_rx.recv().await.unwrap(),
            Event::Module(ModuleEvent::Strike { module_id: 3 })
        );
        assert!(data_rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::with_capacity(4);
        bus.publish(Event::Data(DataEvent::RemoteFailed {
            error: "offline".into(),
        }));
    }
}

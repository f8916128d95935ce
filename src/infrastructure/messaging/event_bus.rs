use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::application::ports::event_publisher::{DomainEvent, EventPublisher};

const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Broadcast-backed event bus. Publishing never blocks and never fails;
/// slow subscribers lag and skip rather than back-pressure the pipeline.
pub struct BroadcastEventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl BroadcastEventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Long-lived subscriber that writes every event to the log, so
    /// indexing outcomes are observable even with no other consumer.
    pub fn spawn_logging_subscriber(&self) {
        let mut receiver = self.subscribe();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(DomainEvent::DocumentIndexed {
                        indexed_document_id,
                        source_document_id,
                        total_chunks,
                    }) => {
                        info!(
                            %indexed_document_id,
                            %source_document_id,
                            total_chunks,
                            "document indexed"
                        );
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, "event log subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for BroadcastEventBus {
    fn publish(&self, event: DomainEvent) {
        // send only errors when nobody is subscribed
        if self.sender.send(event).is_err() {
            debug!("domain event dropped: no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let bus = BroadcastEventBus::new();
        let mut receiver = bus.subscribe();

        let indexed_document_id = Uuid::new_v4();
        bus.publish(DomainEvent::DocumentIndexed {
            indexed_document_id,
            source_document_id: Uuid::new_v4(),
            total_chunks: 6,
        });

        let event = receiver.recv().await.unwrap();
        let DomainEvent::DocumentIndexed {
            indexed_document_id: received_id,
            total_chunks,
            ..
        } = event;
        assert_eq!(received_id, indexed_document_id);
        assert_eq!(total_chunks, 6);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_does_not_panic() {
        let bus = BroadcastEventBus::new();

        bus.publish(DomainEvent::DocumentIndexed {
            indexed_document_id: Uuid::new_v4(),
            source_document_id: Uuid::new_v4(),
            total_chunks: 0,
        });
    }
}

use uuid::Uuid;

/// Events emitted by the pipeline for interested subscribers.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    DocumentIndexed {
        indexed_document_id: Uuid,
        source_document_id: Uuid,
        total_chunks: i32,
    },
}

/// Fire-and-forget publication. Implementations must never let a subscriber
/// failure propagate back into the publishing pipeline.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: DomainEvent);
}

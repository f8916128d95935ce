pub mod answer_generator;
pub mod embedding_service;
pub mod event_publisher;
pub mod page_content_source;
pub mod query_expander;
pub mod type_registry;
pub mod vector_store;

pub use answer_generator::AnswerGenerator;
pub use embedding_service::EmbeddingService;
pub use event_publisher::EventPublisher;
pub use page_content_source::PageContentSource;
pub use query_expander::QueryExpander;
pub use type_registry::DocumentTypeRegistry;
pub use vector_store::VectorStore;

pub mod chat_client;
pub mod embeddings_client;
pub mod extraction_client;
pub mod qdrant_store;
pub mod type_registry;

pub use chat_client::{ChatClient, LlmQueryExpander, OpenAiAnswerGenerator};
pub use embeddings_client::RemoteEmbeddingService;
pub use extraction_client::HttpPageContentSource;
pub use qdrant_store::QdrantVectorStore;
pub use type_registry::StaticDocumentTypeRegistry;

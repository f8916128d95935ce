pub mod chat_message_repository;
pub mod chat_session_repository;
pub mod document_chunk_repository;
pub mod indexed_document_repository;
pub mod rag_config_repository;

pub use chat_message_repository::ChatMessageRepository;
pub use chat_session_repository::ChatSessionRepository;
pub use document_chunk_repository::DocumentChunkRepository;
pub use indexed_document_repository::IndexedDocumentRepository;
pub use rag_config_repository::RagConfigRepository;

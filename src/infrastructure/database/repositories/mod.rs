pub mod postgres_chat_message_repository;
pub mod postgres_chat_session_repository;
pub mod postgres_document_chunk_repository;
pub mod postgres_indexed_document_repository;
pub mod postgres_rag_config_repository;

pub use postgres_chat_message_repository::PostgresChatMessageRepository;
pub use postgres_chat_session_repository::PostgresChatSessionRepository;
pub use postgres_document_chunk_repository::PostgresDocumentChunkRepository;
pub use postgres_indexed_document_repository::PostgresIndexedDocumentRepository;
pub use postgres_rag_config_repository::PostgresRagConfigRepository;

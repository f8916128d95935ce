pub mod chat_message;
pub mod chat_session;
pub mod document_chunk;
pub mod indexed_document;
pub mod rag_config;

pub use chat_message::ChatMessage;
pub use chat_session::ChatSession;
pub use document_chunk::{ChunkDraft, DocumentChunk};
pub use indexed_document::IndexedDocument;
pub use rag_config::{ConfigValidationError, RagConfig, RagConfigUpdate};

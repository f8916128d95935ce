pub mod chat_message_model;
pub mod chat_session_model;
pub mod document_chunk_model;
pub mod indexed_document_model;
pub mod rag_config_model;

pub use chat_message_model::*;
pub use chat_session_model::*;
pub use document_chunk_model::*;
pub use indexed_document_model::*;
pub use rag_config_model::*;

pub mod chunking_strategy;
pub mod document_type_filter;
pub mod message_role;
pub mod source_reference;

pub use chunking_strategy::ChunkingStrategy;
pub use document_type_filter::DocumentTypeFilter;
pub use message_role::MessageRole;
pub use source_reference::SourceReference;

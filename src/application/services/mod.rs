pub mod chat_orchestrator;
pub mod chunking;
pub mod context_assembler;
pub mod document_indexer;
pub mod retrieval;

pub use chat_orchestrator::ChatOrchestratorService;
pub use chunking::ChunkExtractor;
pub use context_assembler::ContextAssembler;
pub use document_indexer::DocumentIndexerService;
pub use retrieval::RetrievalService;

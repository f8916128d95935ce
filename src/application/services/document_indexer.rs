use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::application::ports::event_publisher::DomainEvent;
use crate::application::ports::vector_store::VectorPoint;
use crate::application::ports::{
    EmbeddingService, EventPublisher, PageContentSource, VectorStore,
};
use crate::application::services::chunking::{ChunkExtractor, ChunkingOptions};
use crate::domain::entities::{DocumentChunk, IndexedDocument};
use crate::domain::repositories::{
    DocumentChunkRepository, IndexedDocumentRepository, RagConfigRepository,
};

const EMBED_BATCH_SIZE: usize = 10;

#[derive(Debug)]
pub enum IndexError {
    ContentUnavailable(String),
    EmptyDocument(Uuid),
    ConfigError(String),
    RepositoryError(String),
    EmbeddingError(String),
    VectorStoreError(String),
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::ContentUnavailable(msg) => write!(f, "Content unavailable: {}", msg),
            IndexError::EmptyDocument(id) => {
                write!(f, "Document {} produced no indexable chunks", id)
            }
            IndexError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            IndexError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            IndexError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            IndexError::VectorStoreError(msg) => write!(f, "Vector store error: {}", msg),
        }
    }
}

impl std::error::Error for IndexError {}

#[derive(Debug, Clone)]
pub struct IndexOutcome {
    pub indexed_document_id: Uuid,
    pub total_chunks: i32,
    pub collection_name: String,
}

/// Orchestrates one indexing run: retire any previous index, extract and
/// persist chunks, embed, upsert, reconcile counts, publish the event.
pub struct DocumentIndexerService {
    page_content_source: Arc<dyn PageContentSource>,
    embedding_service: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
    indexed_document_repository: Arc<dyn IndexedDocumentRepository>,
    document_chunk_repository: Arc<dyn DocumentChunkRepository>,
    rag_config_repository: Arc<dyn RagConfigRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    chunk_extractor: ChunkExtractor,
}

impl DocumentIndexerService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        page_content_source: Arc<dyn PageContentSource>,
        embedding_service: Arc<dyn EmbeddingService>,
        vector_store: Arc<dyn VectorStore>,
        indexed_document_repository: Arc<dyn IndexedDocumentRepository>,
        document_chunk_repository: Arc<dyn DocumentChunkRepository>,
        rag_config_repository: Arc<dyn RagConfigRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        chunk_extractor: ChunkExtractor,
    ) -> Self {
        Self {
            page_content_source,
            embedding_service,
            vector_store,
            indexed_document_repository,
            document_chunk_repository,
            rag_config_repository,
            event_publisher,
            chunk_extractor,
        }
    }

    /// Failure policy: after the cleanup step, failures return an error and
    /// leave already-created rows in place; the next successful run retires
    /// them. There is no rollback.
    pub async fn index(
        &self,
        source_document_id: Uuid,
        document_type: &str,
    ) -> Result<IndexOutcome, IndexError> {
        info!(source_document_id = %source_document_id, "indexing document");

        self.retire_existing(source_document_id).await?;

        let pages = self
            .page_content_source
            .fetch_pages(source_document_id)
            .await
            .map_err(|e| IndexError::ContentUnavailable(e.to_string()))?;

        let config = self
            .rag_config_repository
            .get()
            .await
            .map_err(|e| IndexError::ConfigError(e.to_string()))?;
        let options = ChunkingOptions::from_config(&config);

        let drafts = self.chunk_extractor.extract(&pages, &options);
        if drafts.is_empty() {
            return Err(IndexError::EmptyDocument(source_document_id));
        }

        let mut indexed = IndexedDocument::new(source_document_id);
        let chunks: Vec<DocumentChunk> = drafts
            .iter()
            .map(|draft| DocumentChunk::from_draft(indexed.id(), source_document_id, draft.clone()))
            .collect();

        self.indexed_document_repository
            .save(&indexed)
            .await
            .map_err(|e| IndexError::RepositoryError(e.to_string()))?;
        self.document_chunk_repository
            .save_batch(&chunks)
            .await
            .map_err(|e| IndexError::RepositoryError(e.to_string()))?;

        self.vector_store
            .create_collection(indexed.collection_name(), self.embedding_service.dimensions())
            .await
            .map_err(|e| IndexError::VectorStoreError(e.to_string()))?;

        self.embed_and_upsert(&indexed, &chunks, &drafts, document_type)
            .await?;

        let persisted = self
            .document_chunk_repository
            .count_by_indexed_document_id(indexed.id())
            .await
            .map_err(|e| IndexError::RepositoryError(e.to_string()))?;
        indexed.record_chunk_count(persisted as i32);
        self.indexed_document_repository
            .update(&indexed)
            .await
            .map_err(|e| IndexError::RepositoryError(e.to_string()))?;

        self.event_publisher.publish(DomainEvent::DocumentIndexed {
            indexed_document_id: indexed.id(),
            source_document_id,
            total_chunks: indexed.total_chunks(),
        });

        info!(
            source_document_id = %source_document_id,
            collection = %indexed.collection_name(),
            total_chunks = indexed.total_chunks(),
            "document indexed"
        );

        Ok(IndexOutcome {
            indexed_document_id: indexed.id(),
            total_chunks: indexed.total_chunks(),
            collection_name: indexed.collection_name().to_string(),
        })
    }

    /// Re-index cleanup, vector store first, then database. Vector-store
    /// failures are consistency warnings, not fatal: the fresh collection
    /// name makes escaped vectors orphans rather than served results.
    async fn retire_existing(&self, source_document_id: Uuid) -> Result<(), IndexError> {
        let existing = self
            .indexed_document_repository
            .find_by_source_document_id(source_document_id)
            .await
            .map_err(|e| IndexError::RepositoryError(e.to_string()))?;

        let Some(existing) = existing else {
            return Ok(());
        };

        info!(
            source_document_id = %source_document_id,
            collection = %existing.collection_name(),
            "retiring previous index"
        );

        match self
            .vector_store
            .delete_by_parent(existing.collection_name(), existing.id())
            .await
        {
            Ok(removed) => {
                info!(removed, collection = %existing.collection_name(), "deleted stale vectors");
            }
            Err(e) => {
                warn!(
                    collection = %existing.collection_name(),
                    error = %e,
                    "consistency warning: stale vector cleanup failed"
                );
            }
        }

        if let Err(e) = self
            .vector_store
            .delete_collection(existing.collection_name())
            .await
        {
            warn!(
                collection = %existing.collection_name(),
                error = %e,
                "consistency warning: collection delete failed"
            );
        }

        self.document_chunk_repository
            .delete_by_indexed_document_id(existing.id())
            .await
            .map_err(|e| IndexError::RepositoryError(e.to_string()))?;
        self.indexed_document_repository
            .delete(existing.id())
            .await
            .map_err(|e| IndexError::RepositoryError(e.to_string()))?;

        Ok(())
    }

    async fn embed_and_upsert(
        &self,
        indexed: &IndexedDocument,
        chunks: &[DocumentChunk],
        drafts: &[crate::domain::entities::ChunkDraft],
        document_type: &str,
    ) -> Result<(), IndexError> {
        for (chunk_batch, draft_batch) in chunks
            .chunks(EMBED_BATCH_SIZE)
            .zip(drafts.chunks(EMBED_BATCH_SIZE))
        {
            let texts: Vec<String> = chunk_batch
                .iter()
                .map(|chunk| chunk.chunk_text().to_string())
                .collect();

            let vectors = self
                .embedding_service
                .embed_batch(&texts)
                .await
                .map_err(|e| IndexError::EmbeddingError(e.to_string()))?;

            if vectors.len() != chunk_batch.len() {
                return Err(IndexError::EmbeddingError(format!(
                    "expected {} embeddings, got {}",
                    chunk_batch.len(),
                    vectors.len()
                )));
            }

            let points: Vec<VectorPoint> = chunk_batch
                .iter()
                .zip(draft_batch.iter())
                .zip(vectors)
                .map(|((chunk, draft), vector)| VectorPoint {
                    point_id: chunk.vector_point_id(),
                    vector,
                    payload: serde_json::json!({
                        "chunk_id": chunk.chunk_id(),
                        "text": chunk.chunk_text(),
                        "page_number": chunk.page_number(),
                        "paragraph_index": chunk.paragraph_index(),
                        "chunk_index": chunk.chunk_index(),
                        "heading": draft.heading,
                        "token_count": chunk.token_count(),
                        "sentence_count": chunk.sentence_count(),
                        "has_overlap": chunk.has_overlap(),
                        "overlap_sentence_count": chunk.overlap_sentence_count(),
                        "indexed_document_id": chunk.indexed_document_id(),
                        "source_document_id": indexed.source_document_id(),
                        "document_type": document_type,
                        "indexed_at": indexed.indexed_at(),
                    }),
                })
                .collect();

            self.vector_store
                .upsert(indexed.collection_name(), points)
                .await
                .map_err(|e| IndexError::VectorStoreError(e.to_string()))?;
        }

        Ok(())
    }
}

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use crate::application::services::DocumentIndexerService;

#[derive(Debug)]
pub enum IndexDocumentError {
    ValidationError(String),
}

impl std::fmt::Display for IndexDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexDocumentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for IndexDocumentError {}

#[derive(Debug, Clone)]
pub struct IndexDocumentRequest {
    pub source_document_id: Uuid,
    pub document_type: String,
}

/// The workflow subsystem polls on this rather than on HTTP status codes,
/// so pipeline failures come back as a `success: false` body.
#[derive(Debug, Clone)]
pub struct IndexDocumentResponse {
    pub success: bool,
    pub indexed_document_id: Option<Uuid>,
    pub total_chunks: Option<i32>,
    pub collection_name: Option<String>,
    pub error: Option<String>,
}

pub struct IndexDocumentUseCase {
    document_indexer: Arc<DocumentIndexerService>,
}

impl IndexDocumentUseCase {
    pub fn new(document_indexer: Arc<DocumentIndexerService>) -> Self {
        Self { document_indexer }
    }

    pub async fn execute(
        &self,
        request: IndexDocumentRequest,
    ) -> Result<IndexDocumentResponse, IndexDocumentError> {
        if request.source_document_id.is_nil() {
            return Err(IndexDocumentError::ValidationError(
                "source_document_id must not be nil".to_string(),
            ));
        }

        let document_type = request.document_type.trim();
        if document_type.is_empty() {
            return Err(IndexDocumentError::ValidationError(
                "document_type must not be empty".to_string(),
            ));
        }

        match self
            .document_indexer
            .index(request.source_document_id, document_type)
            .await
        {
            Ok(outcome) => Ok(IndexDocumentResponse {
                success: true,
                indexed_document_id: Some(outcome.indexed_document_id),
                total_chunks: Some(outcome.total_chunks),
                collection_name: Some(outcome.collection_name),
                error: None,
            }),
            Err(e) => {
                error!(
                    source_document_id = %request.source_document_id,
                    error = %e,
                    "indexing failed"
                );
                Ok(IndexDocumentResponse {
                    success: false,
                    indexed_document_id: None,
                    total_chunks: None,
                    collection_name: None,
                    error: Some(e.to_string()),
                })
            }
        }
    }
}

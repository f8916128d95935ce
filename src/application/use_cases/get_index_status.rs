use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repositories::IndexedDocumentRepository;

#[derive(Debug)]
pub enum GetIndexStatusError {
    RepositoryError(String),
}

impl std::fmt::Display for GetIndexStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetIndexStatusError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetIndexStatusError {}

#[derive(Debug, Clone)]
pub struct GetIndexStatusRequest {
    pub source_document_id: Uuid,
}

/// `indexed: false` leaves the remaining fields unset; a source document
/// has at most one live index row.
#[derive(Debug, Clone)]
pub struct GetIndexStatusResponse {
    pub indexed: bool,
    pub indexed_document_id: Option<Uuid>,
    pub collection_name: Option<String>,
    pub total_chunks: Option<i32>,
    pub last_indexed_at: Option<DateTime<Utc>>,
}

pub struct GetIndexStatusUseCase {
    indexed_document_repository: Arc<dyn IndexedDocumentRepository>,
}

impl GetIndexStatusUseCase {
    pub fn new(indexed_document_repository: Arc<dyn IndexedDocumentRepository>) -> Self {
        Self {
            indexed_document_repository,
        }
    }

    pub async fn execute(
        &self,
        request: GetIndexStatusRequest,
    ) -> Result<GetIndexStatusResponse, GetIndexStatusError> {
        let document = self
            .indexed_document_repository
            .find_by_source_document_id(request.source_document_id)
            .await
            .map_err(|e| GetIndexStatusError::RepositoryError(e.to_string()))?;

        Ok(match document {
            Some(document) => GetIndexStatusResponse {
                indexed: true,
                indexed_document_id: Some(document.id()),
                collection_name: Some(document.collection_name().to_string()),
                total_chunks: Some(document.total_chunks()),
                last_indexed_at: Some(document.last_updated_at()),
            },
            None => GetIndexStatusResponse {
                indexed: false,
                indexed_document_id: None,
                collection_name: None,
                total_chunks: None,
                last_indexed_at: None,
            },
        })
    }
}

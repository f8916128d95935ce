use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::IndexedDocument;

#[derive(Debug)]
pub enum IndexedDocumentRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
}

impl std::fmt::Display for IndexedDocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexedDocumentRepositoryError::NotFound(id) => {
                write!(f, "Indexed document not found: {}", id)
            }
            IndexedDocumentRepositoryError::DatabaseError(msg) => {
                write!(f, "Database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for IndexedDocumentRepositoryError {}

#[async_trait]
pub trait IndexedDocumentRepository: Send + Sync {
    async fn save(&self, document: &IndexedDocument) -> Result<(), IndexedDocumentRepositoryError>;
    async fn find_by_source_document_id(
        &self,
        source_document_id: Uuid,
    ) -> Result<Option<IndexedDocument>, IndexedDocumentRepositoryError>;
    /// All currently served documents; the retrieval candidate set.
    async fn find_all(&self) -> Result<Vec<IndexedDocument>, IndexedDocumentRepositoryError>;
    async fn update(&self, document: &IndexedDocument)
        -> Result<(), IndexedDocumentRepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, IndexedDocumentRepositoryError>;
}

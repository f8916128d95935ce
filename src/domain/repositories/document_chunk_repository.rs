use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::DocumentChunk;

#[derive(Debug)]
pub enum DocumentChunkRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for DocumentChunkRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentChunkRepositoryError::DatabaseError(msg) => {
                write!(f, "Database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DocumentChunkRepositoryError {}

#[async_trait]
pub trait DocumentChunkRepository: Send + Sync {
    async fn save_batch(&self, chunks: &[DocumentChunk])
        -> Result<(), DocumentChunkRepositoryError>;
    async fn count_by_indexed_document_id(
        &self,
        indexed_document_id: Uuid,
    ) -> Result<i64, DocumentChunkRepositoryError>;
    async fn delete_by_indexed_document_id(
        &self,
        indexed_document_id: Uuid,
    ) -> Result<i64, DocumentChunkRepositoryError>;
}

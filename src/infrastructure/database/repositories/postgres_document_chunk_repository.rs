use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::DocumentChunk;
use crate::domain::repositories::{
    DocumentChunkRepository, document_chunk_repository::DocumentChunkRepositoryError,
};
use crate::infrastructure::database::DbPool;
use crate::infrastructure::database::get_connection_from_pool;
use crate::infrastructure::database::models::NewDocumentChunkModel;
use crate::infrastructure::database::schema::document_chunks::dsl::*;

pub struct PostgresDocumentChunkRepository {
    pool: DbPool,
}

impl PostgresDocumentChunkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentChunkRepository for PostgresDocumentChunkRepository {
    async fn save_batch(
        &self,
        chunks: &[DocumentChunk],
    ) -> Result<(), DocumentChunkRepositoryError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentChunkRepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<NewDocumentChunkModel> =
            chunks.iter().map(NewDocumentChunkModel::from).collect();

        diesel::insert_into(document_chunks)
            .values(&rows)
            .execute(&mut conn)
            .map_err(|e| DocumentChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn count_by_indexed_document_id(
        &self,
        owner_id: Uuid,
    ) -> Result<i64, DocumentChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentChunkRepositoryError::DatabaseError(e.to_string()))?;

        document_chunks
            .filter(indexed_document_id.eq(owner_id))
            .count()
            .get_result(&mut conn)
            .map_err(|e| DocumentChunkRepositoryError::DatabaseError(e.to_string()))
    }

    async fn delete_by_indexed_document_id(
        &self,
        owner_id: Uuid,
    ) -> Result<i64, DocumentChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentChunkRepositoryError::DatabaseError(e.to_string()))?;

        let deleted = diesel::delete(document_chunks.filter(indexed_document_id.eq(owner_id)))
            .execute(&mut conn)
            .map_err(|e| DocumentChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted as i64)
    }
}

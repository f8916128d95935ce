use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::IndexedDocument;
use crate::domain::repositories::{
    IndexedDocumentRepository, indexed_document_repository::IndexedDocumentRepositoryError,
};
use crate::infrastructure::database::get_connection_from_pool;
use crate::infrastructure::database::models::{IndexedDocumentModel, NewIndexedDocumentModel};
use crate::infrastructure::database::DbPool;
use crate::infrastructure::database::schema::indexed_documents::dsl::*;

pub struct PostgresIndexedDocumentRepository {
    pool: DbPool,
}

impl PostgresIndexedDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IndexedDocumentRepository for PostgresIndexedDocumentRepository {
    async fn save(&self, document: &IndexedDocument) -> Result<(), IndexedDocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        let new_document = NewIndexedDocumentModel::from(document);

        diesel::insert_into(indexed_documents)
            .values(&new_document)
            .execute(&mut conn)
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_source_document_id(
        &self,
        source_id: Uuid,
    ) -> Result<Option<IndexedDocument>, IndexedDocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = indexed_documents
            .filter(source_document_id.eq(source_id))
            .first::<IndexedDocumentModel>(&mut conn)
            .optional()
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(IndexedDocument::from))
    }

    async fn find_all(&self) -> Result<Vec<IndexedDocument>, IndexedDocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = indexed_documents
            .order(indexed_at.desc())
            .load::<IndexedDocumentModel>(&mut conn)
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(IndexedDocument::from).collect())
    }

    async fn update(
        &self,
        document: &IndexedDocument,
    ) -> Result<(), IndexedDocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        let changes = NewIndexedDocumentModel::from(document);

        let updated = diesel::update(indexed_documents.find(document.id()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        if updated == 0 {
            return Err(IndexedDocumentRepositoryError::NotFound(document.id()));
        }

        Ok(())
    }

    async fn delete(&self, document_id: Uuid) -> Result<bool, IndexedDocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        let deleted = diesel::delete(indexed_documents.find(document_id))
            .execute(&mut conn)
            .map_err(|e| IndexedDocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted > 0)
    }
}

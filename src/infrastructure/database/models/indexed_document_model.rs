use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::IndexedDocument;
use crate::infrastructure::database::schema::indexed_documents;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = indexed_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IndexedDocumentModel {
    pub id: Uuid,
    pub source_document_id: Uuid,
    pub collection_name: String,
    pub total_chunks: i32,
    pub indexed_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = indexed_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewIndexedDocumentModel {
    pub id: Uuid,
    pub source_document_id: Uuid,
    pub collection_name: String,
    pub total_chunks: i32,
    pub indexed_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

impl From<&IndexedDocument> for NewIndexedDocumentModel {
    fn from(document: &IndexedDocument) -> Self {
        Self {
            id: document.id(),
            source_document_id: document.source_document_id(),
            collection_name: document.collection_name().to_string(),
            total_chunks: document.total_chunks(),
            indexed_at: document.indexed_at(),
            last_updated_at: document.last_updated_at(),
        }
    }
}

impl From<IndexedDocumentModel> for IndexedDocument {
    fn from(model: IndexedDocumentModel) -> Self {
        IndexedDocument::from_database(
            model.id,
            model.source_document_id,
            model.collection_name,
            model.total_chunks,
            model.indexed_at,
            model.last_updated_at,
        )
    }
}

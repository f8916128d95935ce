use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::DocumentChunk;
use crate::infrastructure::database::schema::document_chunks;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentChunkModel {
    pub id: Uuid,
    pub indexed_document_id: Uuid,
    pub chunk_id: String,
    pub chunk_text: String,
    pub page_number: i32,
    pub paragraph_index: i32,
    pub chunk_index: i32,
    pub token_count: i32,
    pub sentence_count: i32,
    pub has_overlap: bool,
    pub overlap_sentence_count: i32,
    pub vector_point_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentChunkModel {
    pub id: Uuid,
    pub indexed_document_id: Uuid,
    pub chunk_id: String,
    pub chunk_text: String,
    pub page_number: i32,
    pub paragraph_index: i32,
    pub chunk_index: i32,
    pub token_count: i32,
    pub sentence_count: i32,
    pub has_overlap: bool,
    pub overlap_sentence_count: i32,
    pub vector_point_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&DocumentChunk> for NewDocumentChunkModel {
    fn from(chunk: &DocumentChunk) -> Self {
        Self {
            id: chunk.id(),
            indexed_document_id: chunk.indexed_document_id(),
            chunk_id: chunk.chunk_id().to_string(),
            chunk_text: chunk.chunk_text().to_string(),
            page_number: chunk.page_number(),
            paragraph_index: chunk.paragraph_index(),
            chunk_index: chunk.chunk_index(),
            token_count: chunk.token_count(),
            sentence_count: chunk.sentence_count(),
            has_overlap: chunk.has_overlap(),
            overlap_sentence_count: chunk.overlap_sentence_count(),
            vector_point_id: chunk.vector_point_id(),
            created_at: chunk.created_at(),
        }
    }
}

impl From<DocumentChunkModel> for DocumentChunk {
    fn from(model: DocumentChunkModel) -> Self {
        DocumentChunk::from_database(
            model.id,
            model.indexed_document_id,
            model.chunk_id,
            model.chunk_text,
            model.page_number,
            model.paragraph_index,
            model.chunk_index,
            model.token_count,
            model.sentence_count,
            model.has_overlap,
            model.overlap_sentence_count,
            model.vector_point_id,
            model.created_at,
        )
    }
}

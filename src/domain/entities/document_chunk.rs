use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Chunk produced by extraction but not yet persisted. Drafts carry all the
/// provenance the chunker derives; identity is assigned when the draft is
/// bound to its owning index record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkDraft {
    pub chunk_index: i32,
    pub page_number: i32,
    pub paragraph_index: i32,
    pub heading: Option<String>,
    pub text: String,
    pub token_count: i32,
    pub sentence_count: i32,
    pub has_overlap: bool,
    pub overlap_sentence_count: i32,
}

/// A persisted retrieval unit. Created in batch by the indexer, never
/// mutated, deleted en masse when its IndexedDocument is retired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    id: Uuid,
    indexed_document_id: Uuid,
    chunk_id: String,
    chunk_text: String,
    page_number: i32,
    paragraph_index: i32,
    chunk_index: i32,
    token_count: i32,
    sentence_count: i32,
    has_overlap: bool,
    overlap_sentence_count: i32,
    vector_point_id: Uuid,
    created_at: DateTime<Utc>,
}

impl DocumentChunk {
    pub fn from_draft(indexed_document_id: Uuid, source_document_id: Uuid, draft: ChunkDraft) -> Self {
        let chunk_id = Self::compose_chunk_id(source_document_id, draft.page_number, draft.chunk_index);
        let vector_point_id = Self::derive_point_id(&chunk_id);
        Self {
            id: Uuid::new_v4(),
            indexed_document_id,
            chunk_id,
            chunk_text: draft.text,
            page_number: draft.page_number,
            paragraph_index: draft.paragraph_index,
            chunk_index: draft.chunk_index,
            token_count: draft.token_count,
            sentence_count: draft.sentence_count,
            has_overlap: draft.has_overlap,
            overlap_sentence_count: draft.overlap_sentence_count,
            vector_point_id,
            created_at: Utc::now(),
        }
    }

    /// Reconstruct from database values (for repository use).
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        indexed_document_id: Uuid,
        chunk_id: String,
        chunk_text: String,
        page_number: i32,
        paragraph_index: i32,
        chunk_index: i32,
        token_count: i32,
        sentence_count: i32,
        has_overlap: bool,
        overlap_sentence_count: i32,
        vector_point_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            indexed_document_id,
            chunk_id,
            chunk_text,
            page_number,
            paragraph_index,
            chunk_index,
            token_count,
            sentence_count,
            has_overlap,
            overlap_sentence_count,
            vector_point_id,
            created_at,
        }
    }

    /// Stable composite identity: document, page, and document-wide chunk
    /// index. Survives re-embedding and is globally unique because the chunk
    /// index is monotonic within one document.
    fn compose_chunk_id(source_document_id: Uuid, page_number: i32, chunk_index: i32) -> String {
        format!(
            "doc-{}-p{}-c{}",
            source_document_id.simple(),
            page_number,
            chunk_index
        )
    }

    /// Vector point ids must be UUIDs; hashing the chunk id gives the same
    /// point id for the same logical chunk on every run.
    fn derive_point_id(chunk_id: &str) -> Uuid {
        let digest = Sha256::digest(chunk_id.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn indexed_document_id(&self) -> Uuid {
        self.indexed_document_id
    }

    pub fn chunk_id(&self) -> &str {
        &self.chunk_id
    }

    pub fn chunk_text(&self) -> &str {
        &self.chunk_text
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn paragraph_index(&self) -> i32 {
        self.paragraph_index
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn token_count(&self) -> i32 {
        self.token_count
    }

    pub fn sentence_count(&self) -> i32 {
        self.sentence_count
    }

    pub fn has_overlap(&self) -> bool {
        self.has_overlap
    }

    pub fn overlap_sentence_count(&self) -> i32 {
        self.overlap_sentence_count
    }

    pub fn vector_point_id(&self) -> Uuid {
        self.vector_point_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(page: i32, index: i32) -> ChunkDraft {
        ChunkDraft {
            chunk_index: index,
            page_number: page,
            paragraph_index: 0,
            heading: None,
            text: "Calibrate the torque wrench before each shift.".to_string(),
            token_count: 7,
            sentence_count: 1,
            has_overlap: false,
            overlap_sentence_count: 0,
        }
    }

    #[test]
    fn test_chunk_id_is_a_document_page_index_composite() {
        let source_id = Uuid::new_v4();
        let chunk = DocumentChunk::from_draft(Uuid::new_v4(), source_id, draft(3, 7));

        assert_eq!(
            chunk.chunk_id(),
            format!("doc-{}-p3-c7", source_id.simple())
        );
    }

    #[test]
    fn test_point_id_is_deterministic_for_the_same_chunk_id() {
        let owner = Uuid::new_v4();
        let source_id = Uuid::new_v4();
        let first = DocumentChunk::from_draft(owner, source_id, draft(1, 0));
        let second = DocumentChunk::from_draft(owner, source_id, draft(1, 0));

        assert_eq!(first.chunk_id(), second.chunk_id());
        assert_eq!(first.vector_point_id(), second.vector_point_id());
        // Row ids stay distinct even for identical drafts.
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_point_ids_differ_across_chunks() {
        let owner = Uuid::new_v4();
        let source_id = Uuid::new_v4();
        let first = DocumentChunk::from_draft(owner, source_id, draft(1, 0));
        let second = DocumentChunk::from_draft(owner, source_id, draft(1, 1));

        assert_ne!(first.vector_point_id(), second.vector_point_id());
    }

    #[test]
    fn test_draft_fields_carry_over() {
        let mut d = draft(2, 4);
        d.has_overlap = true;
        d.overlap_sentence_count = 2;
        d.paragraph_index = 1;

        let chunk = DocumentChunk::from_draft(Uuid::new_v4(), Uuid::new_v4(), d);

        assert_eq!(chunk.page_number(), 2);
        assert_eq!(chunk.chunk_index(), 4);
        assert_eq!(chunk.paragraph_index(), 1);
        assert!(chunk.has_overlap());
        assert_eq!(chunk.overlap_sentence_count(), 2);
        assert!(!chunk.is_empty());
    }
}

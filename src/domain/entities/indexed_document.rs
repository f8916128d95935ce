use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The live index record for one approved source document. At most one row
/// exists per source document; re-indexing deletes the previous row rather
/// than archiving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    id: Uuid,
    source_document_id: Uuid,
    collection_name: String,
    total_chunks: i32,
    indexed_at: DateTime<Utc>,
    last_updated_at: DateTime<Utc>,
}

impl IndexedDocument {
    pub fn new(source_document_id: Uuid) -> Self {
        let now = Utc::now();
        let collection_name = Self::allocate_collection_name(source_document_id, now);
        Self {
            id: Uuid::new_v4(),
            source_document_id,
            collection_name,
            total_chunks: 0,
            indexed_at: now,
            last_updated_at: now,
        }
    }

    /// Reconstruct from database values (for repository use).
    pub fn from_database(
        id: Uuid,
        source_document_id: Uuid,
        collection_name: String,
        total_chunks: i32,
        indexed_at: DateTime<Utc>,
        last_updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            source_document_id,
            collection_name,
            total_chunks,
            indexed_at,
            last_updated_at,
        }
    }

    /// Collection names embed the document id and the creation timestamp, so
    /// a re-index never reuses the name of the index it replaces. Vectors
    /// that survive a failed cleanup become orphans in a dead collection
    /// instead of being served alongside the new ones.
    fn allocate_collection_name(source_document_id: Uuid, created_at: DateTime<Utc>) -> String {
        format!(
            "doc_{}_{}",
            source_document_id.simple(),
            created_at.timestamp_millis()
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source_document_id(&self) -> Uuid {
        self.source_document_id
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn total_chunks(&self) -> i32 {
        self.total_chunks
    }

    pub fn indexed_at(&self) -> DateTime<Utc> {
        self.indexed_at
    }

    pub fn last_updated_at(&self) -> DateTime<Utc> {
        self.last_updated_at
    }

    /// Record the true persisted chunk count once indexing finishes.
    pub fn record_chunk_count(&mut self, total_chunks: i32) {
        self.total_chunks = total_chunks;
        self.last_updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_starts_empty() {
        let source_id = Uuid::new_v4();
        let document = IndexedDocument::new(source_id);

        assert_eq!(document.source_document_id(), source_id);
        assert_eq!(document.total_chunks(), 0);
        assert!(document.collection_name().starts_with("doc_"));
    }

    #[test]
    fn test_collection_name_contains_document_id() {
        let source_id = Uuid::new_v4();
        let document = IndexedDocument::new(source_id);

        assert!(
            document
                .collection_name()
                .contains(&source_id.simple().to_string())
        );
    }

    #[test]
    fn test_reindex_allocates_a_different_collection_name() {
        let source_id = Uuid::new_v4();
        let first = IndexedDocument::new(source_id);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = IndexedDocument::new(source_id);

        assert_ne!(first.collection_name(), second.collection_name());
    }

    #[test]
    fn test_record_chunk_count_touches_update_time() {
        let mut document = IndexedDocument::new(Uuid::new_v4());
        let before = document.last_updated_at();
        std::thread::sleep(std::time::Duration::from_millis(5));

        document.record_chunk_count(12);

        assert_eq!(document.total_chunks(), 12);
        assert!(document.last_updated_at() > before);
    }
}

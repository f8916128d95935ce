use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug)]
pub enum VectorStoreError {
    NetworkError(String),
    ApiError(String),
    InvalidResponse(String),
}

impl std::fmt::Display for VectorStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorStoreError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            VectorStoreError::ApiError(msg) => write!(f, "API error: {}", msg),
            VectorStoreError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for VectorStoreError {}

/// One point to upsert: the chunk's deterministic point id, its embedding,
/// and the full metadata payload served back with search hits.
#[derive(Debug, Clone)]
pub struct VectorPoint {
    pub point_id: Uuid,
    pub vector: Vec<f32>,
    pub payload: Value,
}

/// A scored search hit with the payload fields retrieval needs, already
/// lifted out of the raw payload by the adapter.
#[derive(Debug, Clone)]
pub struct VectorHit {
    pub chunk_id: String,
    pub score: f32,
    pub text: String,
    pub page_number: Option<i32>,
    pub heading: Option<String>,
    pub document_type: Option<String>,
}

/// Metadata constraints pushed down into the store's payload filter.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub document_type: Option<String>,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        self.document_type.is_none()
    }
}

/// Named-collection vector store. Collections are created per indexed
/// document and deleted whole when the document is retired.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn create_collection(
        &self,
        collection: &str,
        dimensions: usize,
    ) -> Result<bool, VectorStoreError>;

    /// Idempotent: deleting an absent collection reports false, not an error.
    async fn delete_collection(&self, collection: &str) -> Result<bool, VectorStoreError>;

    async fn upsert(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> Result<usize, VectorStoreError>;

    /// Delete every point whose payload references the given parent
    /// indexed-document id; returns how many were removed.
    async fn delete_by_parent(
        &self,
        collection: &str,
        parent_id: Uuid,
    ) -> Result<usize, VectorStoreError>;

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        filter: &SearchFilter,
        top_k: usize,
        score_floor: f32,
    ) -> Result<Vec<VectorHit>, VectorStoreError>;

    /// Vector plus lexical full-text match, fused server-side.
    async fn search_hybrid(
        &self,
        collection: &str,
        vector: &[f32],
        query_text: &str,
        filter: &SearchFilter,
        top_k: usize,
        score_floor: f32,
    ) -> Result<Vec<VectorHit>, VectorStoreError>;
}

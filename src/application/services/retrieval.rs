use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::env;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::application::ports::vector_store::{SearchFilter, VectorHit};
use crate::application::ports::{EmbeddingService, VectorStore};
use crate::domain::repositories::IndexedDocumentRepository;

/// Retrieval knobs kept outside RagConfig: these tune the engine itself
/// rather than the document pipeline, and operators set them per deployment.
#[derive(Debug, Clone)]
pub struct RetrievalTuning {
    pub top_k_per_query: usize,
    pub concurrency: usize,
    pub hybrid_enabled: bool,
    pub expansion_count: usize,
    pub context_token_budget: usize,
    pub default_score_floor: f32,
    score_floors: Vec<(String, f32)>,
}

impl Default for RetrievalTuning {
    fn default() -> Self {
        Self {
            top_k_per_query: 8,
            concurrency: 8,
            hybrid_enabled: true,
            expansion_count: 3,
            context_token_budget: 8000,
            default_score_floor: 0.3,
            // Providers score on incompatible scales, so the floor is keyed
            // by embedding model.
            score_floors: vec![
                ("text-embedding-3-small".to_string(), 0.25),
                ("text-embedding-3-large".to_string(), 0.25),
                ("bge-m3".to_string(), 0.4),
                ("nomic-embed-text".to_string(), 0.5),
            ],
        }
    }
}

impl RetrievalTuning {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            top_k_per_query: env_parsed("RETRIEVAL_TOP_K", defaults.top_k_per_query),
            concurrency: env_parsed("RETRIEVAL_CONCURRENCY", defaults.concurrency),
            hybrid_enabled: env_parsed("HYBRID_SEARCH_ENABLED", defaults.hybrid_enabled),
            expansion_count: env_parsed("QUERY_EXPANSION_COUNT", defaults.expansion_count),
            context_token_budget: env_parsed("CONTEXT_TOKEN_BUDGET", defaults.context_token_budget),
            default_score_floor: env_parsed("SCORE_FLOOR_DEFAULT", defaults.default_score_floor),
            score_floors: defaults.score_floors,
        }
    }

    pub fn score_floor_for(&self, embedding_model: &str) -> f32 {
        self.score_floors
            .iter()
            .find(|(model, _)| model == embedding_model)
            .map(|(_, floor)| *floor)
            .unwrap_or(self.default_score_floor)
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug)]
pub enum RetrievalError {
    RepositoryError(String),
}

impl std::fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RetrievalError {}

/// One merged hit after dedup and ranking.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub chunk_id: String,
    pub score: f32,
    pub text: String,
    pub page_number: Option<i32>,
    pub heading: Option<String>,
}

impl From<VectorHit> for RetrievedChunk {
    fn from(hit: VectorHit) -> Self {
        Self {
            chunk_id: hit.chunk_id,
            score: hit.score,
            text: hit.text,
            page_number: hit.page_number,
            heading: hit.heading,
        }
    }
}

/// Fans expanded queries out across every live document collection, then
/// merges hits into one ranked, deduplicated list.
pub struct RetrievalService {
    embedding_service: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
    indexed_document_repository: Arc<dyn IndexedDocumentRepository>,
    tuning: RetrievalTuning,
}

impl RetrievalService {
    pub fn new(
        embedding_service: Arc<dyn EmbeddingService>,
        vector_store: Arc<dyn VectorStore>,
        indexed_document_repository: Arc<dyn IndexedDocumentRepository>,
        tuning: RetrievalTuning,
    ) -> Self {
        Self {
            embedding_service,
            vector_store,
            indexed_document_repository,
            tuning,
        }
    }

    pub fn tuning(&self) -> &RetrievalTuning {
        &self.tuning
    }

    /// Per-search failures degrade to zero hits for that pair; only the
    /// candidate-set lookup can fail the whole call.
    pub async fn retrieve(
        &self,
        queries: &[String],
        filter: &SearchFilter,
    ) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        let documents = self
            .indexed_document_repository
            .find_all()
            .await
            .map_err(|e| RetrievalError::RepositoryError(e.to_string()))?;

        if documents.is_empty() || queries.is_empty() {
            return Ok(Vec::new());
        }

        // Embed each query once, not once per document.
        let mut embedded: Vec<(&String, Vec<f32>)> = Vec::with_capacity(queries.len());
        for query in queries {
            match self.embedding_service.embed(query).await {
                Ok(vector) => embedded.push((query, vector)),
                Err(e) => {
                    warn!(error = %e, "query embedding failed, skipping query");
                }
            }
        }

        let score_floor = self
            .tuning
            .score_floor_for(self.embedding_service.model_name());

        let mut searches = Vec::with_capacity(embedded.len() * documents.len());
        for (query_text, vector) in &embedded {
            for document in &documents {
                searches.push(self.search_one(
                    document.collection_name(),
                    query_text,
                    vector,
                    filter,
                    score_floor,
                ));
            }
        }

        let batches: Vec<Vec<VectorHit>> = stream::iter(searches)
            .buffer_unordered(self.tuning.concurrency.max(1))
            .collect()
            .await;

        Ok(merge_hits(batches.into_iter().flatten()))
    }

    async fn search_one(
        &self,
        collection: &str,
        query_text: &str,
        vector: &[f32],
        filter: &SearchFilter,
        score_floor: f32,
    ) -> Vec<VectorHit> {
        let outcome = if self.tuning.hybrid_enabled {
            self.vector_store
                .search_hybrid(
                    collection,
                    vector,
                    query_text,
                    filter,
                    self.tuning.top_k_per_query,
                    score_floor,
                )
                .await
        } else {
            self.vector_store
                .search(
                    collection,
                    vector,
                    filter,
                    self.tuning.top_k_per_query,
                    score_floor,
                )
                .await
        };

        match outcome {
            Ok(hits) => hits,
            Err(e) => {
                warn!(collection = %collection, error = %e, "search degraded to zero hits");
                Vec::new()
            }
        }
    }
}

/// Dedup by chunk_id keeping the maximum score, then sort descending.
fn merge_hits(hits: impl Iterator<Item = VectorHit>) -> Vec<RetrievedChunk> {
    let mut best: HashMap<String, RetrievedChunk> = HashMap::new();
    for hit in hits {
        match best.entry(hit.chunk_id.clone()) {
            Entry::Occupied(mut slot) => {
                if hit.score > slot.get().score {
                    slot.insert(hit.into());
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(hit.into());
            }
        }
    }

    let mut merged: Vec<RetrievedChunk> = best.into_values().collect();
    merged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::application::ports::embedding_service::EmbeddingServiceError;
    use crate::application::ports::vector_store::{VectorPoint, VectorStoreError};
    use crate::domain::entities::IndexedDocument;
    use crate::domain::repositories::indexed_document_repository::IndexedDocumentRepositoryError;

    fn hit(chunk_id: &str, score: f32) -> VectorHit {
        VectorHit {
            chunk_id: chunk_id.to_string(),
            score,
            text: format!("text of {}", chunk_id),
            page_number: Some(1),
            heading: None,
            document_type: None,
        }
    }

    #[test]
    fn test_merge_keeps_max_score_per_chunk() {
        let merged = merge_hits(
            vec![hit("a", 0.4), hit("b", 0.9), hit("a", 0.7), hit("b", 0.2)].into_iter(),
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].chunk_id, "b");
        assert!((merged[0].score - 0.9).abs() < f32::EPSILON);
        assert!((merged[1].score - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_merge_sorts_descending() {
        let merged = merge_hits(vec![hit("a", 0.1), hit("b", 0.5), hit("c", 0.3)].into_iter());

        let scores: Vec<f32> = merged.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![0.5, 0.3, 0.1]);
    }

    #[test]
    fn test_score_floor_falls_back_to_default() {
        let tuning = RetrievalTuning::default();

        assert!((tuning.score_floor_for("bge-m3") - 0.4).abs() < f32::EPSILON);
        assert!((tuning.score_floor_for("some-new-model") - 0.3).abs() < f32::EPSILON);
    }

    struct FixedEmbedding;

    #[async_trait]
    impl EmbeddingService for FixedEmbedding {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingServiceError> {
            Ok(vec![0.1, 0.2, 0.3])
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vec<f32>>, EmbeddingServiceError> {
            Ok(texts.iter().map(|_| vec![0.1, 0.2, 0.3]).collect())
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn model_name(&self) -> &str {
            "text-embedding-3-small"
        }
    }

    /// Returns a fixed hit set for one collection and errors for another.
    struct SplitStore;

    #[async_trait]
    impl VectorStore for SplitStore {
        async fn create_collection(&self, _: &str, _: usize) -> Result<bool, VectorStoreError> {
            Ok(true)
        }

        async fn delete_collection(&self, _: &str) -> Result<bool, VectorStoreError> {
            Ok(true)
        }

        async fn upsert(&self, _: &str, _: Vec<VectorPoint>) -> Result<usize, VectorStoreError> {
            Ok(0)
        }

        async fn delete_by_parent(&self, _: &str, _: Uuid) -> Result<usize, VectorStoreError> {
            Ok(0)
        }

        async fn search(
            &self,
            collection: &str,
            _vector: &[f32],
            _filter: &SearchFilter,
            _top_k: usize,
            _score_floor: f32,
        ) -> Result<Vec<VectorHit>, VectorStoreError> {
            if collection.contains("broken") {
                Err(VectorStoreError::NetworkError("connection refused".to_string()))
            } else {
                Ok(vec![hit("doc-a-p1-c0", 0.8), hit("doc-a-p1-c1", 0.6)])
            }
        }

        async fn search_hybrid(
            &self,
            collection: &str,
            vector: &[f32],
            _query_text: &str,
            filter: &SearchFilter,
            top_k: usize,
            score_floor: f32,
        ) -> Result<Vec<VectorHit>, VectorStoreError> {
            self.search(collection, vector, filter, top_k, score_floor).await
        }
    }

    struct TwoDocuments;

    #[async_trait]
    impl IndexedDocumentRepository for TwoDocuments {
        async fn save(&self, _: &IndexedDocument) -> Result<(), IndexedDocumentRepositoryError> {
            Ok(())
        }

        async fn find_by_source_document_id(
            &self,
            _: Uuid,
        ) -> Result<Option<IndexedDocument>, IndexedDocumentRepositoryError> {
            Ok(None)
        }

        async fn find_all(&self) -> Result<Vec<IndexedDocument>, IndexedDocumentRepositoryError> {
            let healthy = IndexedDocument::new(Uuid::new_v4());
            let broken = IndexedDocument::from_database(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "doc_broken_1".to_string(),
                0,
                chrono::Utc::now(),
                chrono::Utc::now(),
            );
            Ok(vec![healthy, broken])
        }

        async fn update(&self, _: &IndexedDocument) -> Result<(), IndexedDocumentRepositoryError> {
            Ok(())
        }

        async fn delete(&self, _: Uuid) -> Result<bool, IndexedDocumentRepositoryError> {
            Ok(false)
        }
    }

    fn service() -> RetrievalService {
        RetrievalService::new(
            Arc::new(FixedEmbedding),
            Arc::new(SplitStore),
            Arc::new(TwoDocuments),
            RetrievalTuning::default(),
        )
    }

    #[tokio::test]
    async fn test_failed_collections_degrade_to_zero_hits() {
        let merged = service()
            .retrieve(&["safety rules".to_string()], &SearchFilter::default())
            .await
            .unwrap();

        // The broken collection contributes nothing; the healthy one still
        // answers, deduplicated across the two documents.
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].chunk_id, "doc-a-p1-c0");
    }

    #[tokio::test]
    async fn test_duplicate_hits_across_queries_are_merged() {
        let queries = vec![
            "what are the safety rules".to_string(),
            "safety instructions".to_string(),
        ];

        let merged = service()
            .retrieve(&queries, &SearchFilter::default())
            .await
            .unwrap();

        assert_eq!(merged.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_query_set_yields_no_hits() {
        let merged = service().retrieve(&[], &SearchFilter::default()).await.unwrap();

        assert!(merged.is_empty());
    }
}

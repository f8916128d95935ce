use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::env;
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

use crate::application::ports::vector_store::{
    SearchFilter, VectorHit, VectorPoint, VectorStore, VectorStoreError,
};

#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        let base_url =
            env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6333".to_string());

        Self {
            base_url,
            api_key: env::var("QDRANT_API_KEY").ok(),
            timeout_secs: 30,
        }
    }
}

#[derive(Deserialize)]
struct QdrantEnvelope<T> {
    result: T,
}

#[derive(Deserialize)]
struct ScoredPoint {
    score: f32,
    #[serde(default)]
    payload: Value,
}

#[derive(Deserialize)]
struct QueryApiResult {
    points: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct CountResult {
    count: usize,
}

/// VectorStore adapter over the Qdrant REST API. Collections hold one
/// dense vector per point with the chunk payload attached.
pub struct QdrantVectorStore {
    client: Client,
    config: QdrantConfig,
}

impl QdrantVectorStore {
    pub fn new(config: QdrantConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(QdrantConfig::default())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(api_key) => builder.header("api-key", api_key),
            None => builder,
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, VectorStoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::ApiError(format!(
                "qdrant returned {}: {}",
                status, body
            )));
        }

        let envelope = response
            .json::<QdrantEnvelope<T>>()
            .await
            .map_err(|e| VectorStoreError::InvalidResponse(e.to_string()))?;

        Ok(envelope.result)
    }

    fn hits_from_points(points: Vec<ScoredPoint>) -> Vec<VectorHit> {
        points
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;
                let Some(chunk_id) = payload.get("chunk_id").and_then(Value::as_str) else {
                    warn!("dropping qdrant point without chunk_id payload");
                    return None;
                };

                Some(VectorHit {
                    chunk_id: chunk_id.to_string(),
                    score: point.score,
                    text: payload
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    page_number: payload
                        .get("page_number")
                        .and_then(Value::as_i64)
                        .map(|n| n as i32),
                    heading: payload
                        .get("heading")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    document_type: payload
                        .get("document_type")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
            })
            .collect()
    }
}

fn payload_filter(filter: &SearchFilter) -> Option<Value> {
    if filter.is_empty() {
        return None;
    }

    let mut must = Vec::new();
    if let Some(document_type) = &filter.document_type {
        must.push(json!({ "key": "document_type", "match": { "value": document_type } }));
    }

    Some(json!({ "must": must }))
}

fn parent_filter(parent_id: Uuid) -> Value {
    json!({
        "must": [
            { "key": "indexed_document_id", "match": { "value": parent_id.to_string() } }
        ]
    })
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn create_collection(
        &self,
        collection: &str,
        dimensions: usize,
    ) -> Result<bool, VectorStoreError> {
        let body = json!({
            "vectors": { "size": dimensions, "distance": "Cosine" }
        });

        let response = self
            .request(
                self.client
                    .put(self.url(&format!("/collections/{}", collection))),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        Self::parse::<bool>(response).await
    }

    async fn delete_collection(&self, collection: &str) -> Result<bool, VectorStoreError> {
        let response = self
            .request(
                self.client
                    .delete(self.url(&format!("/collections/{}", collection))),
            )
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        Self::parse::<bool>(response).await
    }

    async fn upsert(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> Result<usize, VectorStoreError> {
        if points.is_empty() {
            return Ok(0);
        }

        let count = points.len();
        let body = json!({
            "points": points
                .into_iter()
                .map(|point| json!({
                    "id": point.point_id,
                    "vector": point.vector,
                    "payload": point.payload,
                }))
                .collect::<Vec<_>>()
        });

        let response = self
            .request(
                self.client
                    .put(self.url(&format!("/collections/{}/points?wait=true", collection))),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        Self::parse::<Value>(response).await?;
        Ok(count)
    }

    async fn delete_by_parent(
        &self,
        collection: &str,
        parent_id: Uuid,
    ) -> Result<usize, VectorStoreError> {
        let filter = parent_filter(parent_id);

        // Count first; the delete endpoint does not report how many points
        // matched.
        let count_response = self
            .request(
                self.client
                    .post(self.url(&format!("/collections/{}/points/count", collection))),
            )
            .json(&json!({ "filter": filter, "exact": true }))
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        let count = Self::parse::<CountResult>(count_response).await?.count;

        let delete_response = self
            .request(self.client.post(self.url(&format!(
                "/collections/{}/points/delete?wait=true",
                collection
            ))))
            .json(&json!({ "filter": filter }))
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        Self::parse::<Value>(delete_response).await?;
        Ok(count)
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        filter: &SearchFilter,
        top_k: usize,
        score_floor: f32,
    ) -> Result<Vec<VectorHit>, VectorStoreError> {
        let mut body = json!({
            "vector": vector,
            "limit": top_k,
            "score_threshold": score_floor,
            "with_payload": true,
        });
        if let Some(filter) = payload_filter(filter) {
            body["filter"] = filter;
        }

        let response = self
            .request(
                self.client
                    .post(self.url(&format!("/collections/{}/points/search", collection))),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        let points = Self::parse::<Vec<ScoredPoint>>(response).await?;
        Ok(Self::hits_from_points(points))
    }

    /// Two prefetch branches fused with reciprocal-rank fusion: a plain
    /// dense search, and a dense search constrained to points whose text
    /// matches the query words. Scores on the fused hits are RRF ranks,
    /// not cosine similarities; the score floor applies inside each branch.
    async fn search_hybrid(
        &self,
        collection: &str,
        vector: &[f32],
        query_text: &str,
        filter: &SearchFilter,
        top_k: usize,
        score_floor: f32,
    ) -> Result<Vec<VectorHit>, VectorStoreError> {
        let prefetch_limit = top_k.max(1) * 2;

        let mut dense_branch = json!({
            "query": vector,
            "limit": prefetch_limit,
            "score_threshold": score_floor,
        });

        let mut lexical_must = vec![json!({
            "key": "text",
            "match": { "text": query_text }
        })];
        if let Some(document_type) = &filter.document_type {
            lexical_must
                .push(json!({ "key": "document_type", "match": { "value": document_type } }));
        }
        let lexical_branch = json!({
            "query": vector,
            "limit": prefetch_limit,
            "score_threshold": score_floor,
            "filter": { "must": lexical_must },
        });

        if let Some(filter) = payload_filter(filter) {
            dense_branch["filter"] = filter;
        }

        let body = json!({
            "prefetch": [dense_branch, lexical_branch],
            "query": { "fusion": "rrf" },
            "limit": top_k,
            "with_payload": true,
        });

        let response = self
            .request(
                self.client
                    .post(self.url(&format!("/collections/{}/points/query", collection))),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        let result = Self::parse::<QueryApiResult>(response).await?;
        Ok(Self::hits_from_points(result.points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_filter_is_none_when_empty() {
        assert!(payload_filter(&SearchFilter::default()).is_none());
    }

    #[test]
    fn test_payload_filter_matches_document_type() {
        let filter = SearchFilter {
            document_type: Some("SOP".to_string()),
        };

        let value = payload_filter(&filter).unwrap();
        assert_eq!(value["must"][0]["key"], "document_type");
        assert_eq!(value["must"][0]["match"]["value"], "SOP");
    }

    #[test]
    fn test_parent_filter_targets_indexed_document_id() {
        let parent = Uuid::new_v4();

        let value = parent_filter(parent);
        assert_eq!(value["must"][0]["key"], "indexed_document_id");
        assert_eq!(value["must"][0]["match"]["value"], parent.to_string());
    }

    #[test]
    fn test_hits_skip_points_without_chunk_id() {
        let points = vec![
            ScoredPoint {
                score: 0.9,
                payload: serde_json::json!({
                    "chunk_id": "doc-a-p1-c0",
                    "text": "Calibration is weekly.",
                    "page_number": 1,
                }),
            },
            ScoredPoint {
                score: 0.5,
                payload: serde_json::json!({ "text": "orphan" }),
            },
        ];

        let hits = QdrantVectorStore::hits_from_points(points);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk_id, "doc-a-p1-c0");
        assert_eq!(hits[0].page_number, Some(1));
        assert!(hits[0].heading.is_none());
    }
}

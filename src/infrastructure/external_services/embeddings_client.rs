use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::embedding_service::{EmbeddingService, EmbeddingServiceError};

#[derive(Serialize)]
struct EmbeddingsApiRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsApiResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClientConfig {
    pub service_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl Default for EmbeddingsClientConfig {
    fn default() -> Self {
        let service_url = env::var("EMBEDDINGS_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8081/v1/embeddings".to_string());
        let model = env::var("EMBEDDING_MODEL")
            .unwrap_or_else(|_| "text-embedding-3-small".to_string());

        Self {
            service_url,
            api_key: env::var("EMBEDDINGS_API_KEY").ok(),
            model,
            max_retries: 3,
            timeout_secs: 30,
            backoff_factor: 1.5,
        }
    }
}

impl EmbeddingsClientConfig {
    /// Env defaults with the model overridden by the stored RAG config.
    pub fn with_model(model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub enum EmbeddingsClientError {
    RequestError(String),
    ParseError(String),
    MaxRetriesExceeded,
}

/// Vector dimension per supported model; the vector store sizes each
/// collection from this.
fn model_dimensions(model: &str) -> usize {
    match model {
        "text-embedding-3-small" => 1536,
        "text-embedding-3-large" => 3072,
        "bge-m3" => 1024,
        "nomic-embed-text" => 768,
        _ => 1536,
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClient {
    client: Client,
    config: EmbeddingsClientConfig,
}

impl EmbeddingsClient {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn get_embeddings(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, EmbeddingsClientError> {
        let mut attempts = 0;
        let mut last_error = None;

        loop {
            attempts += 1;

            match self.execute_request(texts).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = Some(e);

                    if attempts > self.config.max_retries {
                        break;
                    }

                    let backoff_time = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );

                    tokio::time::sleep(backoff_time).await;
                }
            }
        }

        Err(last_error.unwrap_or(EmbeddingsClientError::MaxRetriesExceeded))
    }

    async fn execute_request(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, EmbeddingsClientError> {
        let request = EmbeddingsApiRequest {
            model: &self.config.model,
            input: texts,
        };

        let mut builder = self.client.post(&self.config.service_url).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EmbeddingsClientError::RequestError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(EmbeddingsClientError::RequestError(format!(
                "embedding service returned {}",
                response.status()
            )));
        }

        let body = response
            .json::<EmbeddingsApiResponse>()
            .await
            .map_err(|e| EmbeddingsClientError::ParseError(e.to_string()))?;

        // The API may reorder entries; the index field restores input order.
        let mut data = body.data;
        data.sort_by_key(|entry| entry.index);

        Ok(data.into_iter().map(|entry| entry.embedding).collect())
    }
}

/// EmbeddingService adapter over the embeddings HTTP API.
pub struct RemoteEmbeddingService {
    client: EmbeddingsClient,
    model: String,
    dimensions: usize,
}

impl RemoteEmbeddingService {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, ReqwestError> {
        let model = config.model.clone();
        let dimensions = model_dimensions(&model);
        let client = EmbeddingsClient::new(config)?;

        Ok(Self {
            client,
            model,
            dimensions,
        })
    }

    fn map_error(error: EmbeddingsClientError) -> EmbeddingServiceError {
        match error {
            EmbeddingsClientError::RequestError(msg) => EmbeddingServiceError::NetworkError(msg),
            EmbeddingsClientError::ParseError(msg) => EmbeddingServiceError::ApiError(msg),
            EmbeddingsClientError::MaxRetriesExceeded => EmbeddingServiceError::ServiceUnavailable,
        }
    }
}

#[async_trait]
impl EmbeddingService for RemoteEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingServiceError> {
        if text.trim().is_empty() {
            return Err(EmbeddingServiceError::InvalidInput(
                "cannot embed empty text".to_string(),
            ));
        }

        let input = [text.to_string()];
        let embeddings = self
            .client
            .get_embeddings(&input)
            .await
            .map_err(Self::map_error)?;

        embeddings.into_iter().next().ok_or_else(|| {
            EmbeddingServiceError::ApiError("no embedding returned".to_string())
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingServiceError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self
            .client
            .get_embeddings(texts)
            .await
            .map_err(Self::map_error)?;

        if embeddings.len() != texts.len() {
            return Err(EmbeddingServiceError::ApiError(format!(
                "asked for {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_dimensions() {
        assert_eq!(model_dimensions("text-embedding-3-small"), 1536);
        assert_eq!(model_dimensions("text-embedding-3-large"), 3072);
        assert_eq!(model_dimensions("bge-m3"), 1024);
        assert_eq!(model_dimensions("nomic-embed-text"), 768);
    }

    #[test]
    fn test_config_model_override() {
        let config = EmbeddingsClientConfig::with_model("bge-m3");

        assert_eq!(config.model, "bge-m3");
        assert_eq!(config.max_retries, 3);
    }
}

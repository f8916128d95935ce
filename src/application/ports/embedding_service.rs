use async_trait::async_trait;

#[derive(Debug)]
pub enum EmbeddingServiceError {
    NetworkError(String),
    ApiError(String),
    InvalidInput(String),
    ServiceUnavailable,
}

impl std::fmt::Display for EmbeddingServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingServiceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            EmbeddingServiceError::ApiError(msg) => write!(f, "API error: {}", msg),
            EmbeddingServiceError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            EmbeddingServiceError::ServiceUnavailable => write!(f, "Service unavailable"),
        }
    }
}

impl std::error::Error for EmbeddingServiceError {}

/// Embedding computation for chunk texts and queries. One adapter per
/// deployment; the configured model decides the vector dimension, so the
/// dimension is queried from here and never hard-coded downstream.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingServiceError>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingServiceError>;

    fn dimensions(&self) -> usize;

    fn model_name(&self) -> &str;
}

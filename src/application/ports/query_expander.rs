use async_trait::async_trait;

#[derive(Debug)]
pub enum QueryExpansionError {
    ProviderError(String),
    InvalidResponse(String),
}

impl std::fmt::Display for QueryExpansionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryExpansionError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            QueryExpansionError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for QueryExpansionError {}

/// Produces up to `n` alternative phrasings of a question for multi-query
/// retrieval. Failures here are always recoverable: the pipeline falls back
/// to the original question alone.
#[async_trait]
pub trait QueryExpander: Send + Sync {
    async fn expand(&self, question: &str, n: usize) -> Result<Vec<String>, QueryExpansionError>;
}

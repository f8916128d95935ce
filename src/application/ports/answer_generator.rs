use async_trait::async_trait;

#[derive(Debug)]
pub enum GenerationError {
    UnknownModel(String),
    Timeout(u64),
    UpstreamError(String),
    NetworkError(String),
    InvalidResponse(String),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::UnknownModel(model) => write!(f, "Unknown model: {}", model),
            GenerationError::Timeout(secs) => {
                write!(f, "Generation timed out after {} seconds", secs)
            }
            GenerationError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            GenerationError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            GenerationError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for GenerationError {}

/// One chunk handed to the generator, in final context order.
#[derive(Debug, Clone)]
pub struct ContextChunk {
    pub chunk_id: String,
    pub text: String,
    pub page_number: Option<i32>,
    pub heading: Option<String>,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct GeneratedAnswer {
    pub answer: String,
    pub model_used: String,
    pub tokens_used: Option<i32>,
    pub confidence: Option<f32>,
}

/// Grounded answer generation. The caller owns the timeout; adapters map
/// provider faults to the typed variants above.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(
        &self,
        question: &str,
        context: &[ContextChunk],
        model_id: &str,
    ) -> Result<GeneratedAnswer, GenerationError>;
}

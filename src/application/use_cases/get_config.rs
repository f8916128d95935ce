use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::RagConfig;
use crate::domain::repositories::RagConfigRepository;
use crate::domain::value_objects::ChunkingStrategy;

#[derive(Debug)]
pub enum GetConfigError {
    RepositoryError(String),
}

impl std::fmt::Display for GetConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetConfigError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetConfigError {}

#[derive(Debug, Clone)]
pub struct ConfigResponse {
    pub parser: String,
    pub chunking_strategy: ChunkingStrategy,
    pub embedding_model: String,
    pub ai_model: String,
    pub chunk_size: i32,
    pub chunk_overlap: i32,
    pub max_context_chunks: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<&RagConfig> for ConfigResponse {
    fn from(config: &RagConfig) -> Self {
        Self {
            parser: config.parser().to_string(),
            chunking_strategy: config.chunking_strategy(),
            embedding_model: config.embedding_model().to_string(),
            ai_model: config.ai_model().to_string(),
            chunk_size: config.chunk_size(),
            chunk_overlap: config.chunk_overlap(),
            max_context_chunks: config.max_context_chunks(),
            updated_at: config.updated_at(),
        }
    }
}

pub struct GetConfigUseCase {
    rag_config_repository: Arc<dyn RagConfigRepository>,
}

impl GetConfigUseCase {
    pub fn new(rag_config_repository: Arc<dyn RagConfigRepository>) -> Self {
        Self {
            rag_config_repository,
        }
    }

    pub async fn execute(&self) -> Result<ConfigResponse, GetConfigError> {
        let config = self
            .rag_config_repository
            .get()
            .await
            .map_err(|e| GetConfigError::RepositoryError(e.to_string()))?;

        Ok(ConfigResponse::from(&config))
    }
}

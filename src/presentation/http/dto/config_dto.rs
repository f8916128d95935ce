use serde::{Deserialize, Serialize};

use crate::domain::entities::RagConfigUpdate;
use crate::domain::value_objects::ChunkingStrategy;

#[derive(Debug, Serialize)]
pub struct ConfigResponseDto {
    pub parser: String,
    pub chunking_strategy: String,
    pub embedding_model: String,
    pub ai_model: String,
    pub chunk_size: i32,
    pub chunk_overlap: i32,
    pub max_context_chunks: i32,
    pub updated_at: String,
}

impl From<crate::application::use_cases::get_config::ConfigResponse> for ConfigResponseDto {
    fn from(response: crate::application::use_cases::get_config::ConfigResponse) -> Self {
        Self {
            parser: response.parser,
            chunking_strategy: response.chunking_strategy.as_str().to_string(),
            embedding_model: response.embedding_model,
            ai_model: response.ai_model,
            chunk_size: response.chunk_size,
            chunk_overlap: response.chunk_overlap,
            max_context_chunks: response.max_context_chunks,
            updated_at: response.updated_at.to_rfc3339(),
        }
    }
}

/// All fields optional; omitted ones keep their stored value. The chunking
/// strategy arrives as a string so a bad name surfaces as a field-level
/// validation error instead of a serde rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequestDto {
    pub parser: Option<String>,
    pub chunking_strategy: Option<String>,
    pub embedding_model: Option<String>,
    pub ai_model: Option<String>,
    pub chunk_size: Option<i32>,
    pub chunk_overlap: Option<i32>,
    pub max_context_chunks: Option<i32>,
}

impl UpdateConfigRequestDto {
    pub fn into_update(self) -> Result<RagConfigUpdate, String> {
        let chunking_strategy = match self.chunking_strategy {
            Some(raw) => Some(ChunkingStrategy::from_str(&raw)?),
            None => None,
        };

        Ok(RagConfigUpdate {
            parser: self.parser,
            chunking_strategy,
            embedding_model: self.embedding_model,
            ai_model: self.ai_model,
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            max_context_chunks: self.max_context_chunks,
        })
    }
}

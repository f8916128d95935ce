use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::entities::RagConfig;
use crate::domain::value_objects::ChunkingStrategy;
use crate::infrastructure::database::schema::rag_config;

/// The config table holds exactly one row.
pub const RAG_CONFIG_ROW_ID: i32 = 1;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = rag_config)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RagConfigModel {
    pub id: i32,
    pub parser: String,
    pub chunking_strategy: String,
    pub embedding_model: String,
    pub ai_model: String,
    pub chunk_size: i32,
    pub chunk_overlap: i32,
    pub max_context_chunks: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = rag_config)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewRagConfigModel {
    pub id: i32,
    pub parser: String,
    pub chunking_strategy: String,
    pub embedding_model: String,
    pub ai_model: String,
    pub chunk_size: i32,
    pub chunk_overlap: i32,
    pub max_context_chunks: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<&RagConfig> for NewRagConfigModel {
    fn from(config: &RagConfig) -> Self {
        Self {
            id: RAG_CONFIG_ROW_ID,
            parser: config.parser().to_string(),
            chunking_strategy: config.chunking_strategy().as_str().to_string(),
            embedding_model: config.embedding_model().to_string(),
            ai_model: config.ai_model().to_string(),
            chunk_size: config.chunk_size(),
            chunk_overlap: config.chunk_overlap(),
            max_context_chunks: config.max_context_chunks(),
            updated_at: config.updated_at(),
        }
    }
}

impl TryFrom<RagConfigModel> for RagConfig {
    type Error = String;

    fn try_from(model: RagConfigModel) -> Result<Self, Self::Error> {
        let chunking_strategy = ChunkingStrategy::from_str(&model.chunking_strategy)?;

        Ok(RagConfig::from_database(
            model.parser,
            chunking_strategy,
            model.embedding_model,
            model.ai_model,
            model.chunk_size,
            model.chunk_overlap,
            model.max_context_chunks,
            model.updated_at,
        ))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ChunkingStrategy;

pub const LEGAL_PARSERS: &[&str] = &["standard", "vision", "ocr"];
pub const LEGAL_EMBEDDING_MODELS: &[&str] = &[
    "text-embedding-3-small",
    "text-embedding-3-large",
    "bge-m3",
    "nomic-embed-text",
];
pub const LEGAL_AI_MODELS: &[&str] = &["gpt-4o", "gpt-4o-mini", "gpt-4-turbo", "gpt-3.5-turbo"];

pub const MIN_CHUNK_SIZE: i32 = 64;
pub const MAX_CHUNK_SIZE: i32 = 4096;
pub const MAX_CHUNK_OVERLAP: i32 = 1024;
pub const MAX_CONTEXT_CHUNKS_LIMIT: i32 = 50;

/// Process-wide pipeline configuration, stored as a single row. Every field
/// is validated when written; readers can rely on stored values being legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagConfig {
    parser: String,
    chunking_strategy: ChunkingStrategy,
    embedding_model: String,
    ai_model: String,
    chunk_size: i32,
    chunk_overlap: i32,
    max_context_chunks: i32,
    updated_at: DateTime<Utc>,
}

/// Partial update applied to the stored config. `None` fields keep their
/// current value. Validation happens against the would-be result, so an
/// update that only sets `chunk_overlap` is still checked against the
/// effective `chunk_size`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RagConfigUpdate {
    pub parser: Option<String>,
    pub chunking_strategy: Option<ChunkingStrategy>,
    pub embedding_model: Option<String>,
    pub ai_model: Option<String>,
    pub chunk_size: Option<i32>,
    pub chunk_overlap: Option<i32>,
    pub max_context_chunks: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            parser: "standard".to_string(),
            chunking_strategy: ChunkingStrategy::default(),
            embedding_model: "text-embedding-3-small".to_string(),
            ai_model: "gpt-4o-mini".to_string(),
            chunk_size: 512,
            chunk_overlap: 64,
            max_context_chunks: 10,
            updated_at: Utc::now(),
        }
    }
}

impl RagConfig {
    /// Reconstruct from database values (for repository use).
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        parser: String,
        chunking_strategy: ChunkingStrategy,
        embedding_model: String,
        ai_model: String,
        chunk_size: i32,
        chunk_overlap: i32,
        max_context_chunks: i32,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            parser,
            chunking_strategy,
            embedding_model,
            ai_model,
            chunk_size,
            chunk_overlap,
            max_context_chunks,
            updated_at,
        }
    }

    pub fn parser(&self) -> &str {
        &self.parser
    }

    pub fn chunking_strategy(&self) -> ChunkingStrategy {
        self.chunking_strategy
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn ai_model(&self) -> &str {
        &self.ai_model
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> i32 {
        self.chunk_overlap
    }

    pub fn max_context_chunks(&self) -> i32 {
        self.max_context_chunks
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Validate and apply a partial update. All fields are checked against
    /// the prospective values before anything is written, so a rejected
    /// update leaves the config exactly as it was.
    pub fn apply_update(&mut self, update: RagConfigUpdate) -> Result<(), ConfigValidationError> {
        let parser = update.parser.unwrap_or_else(|| self.parser.clone());
        let chunking_strategy = update.chunking_strategy.unwrap_or(self.chunking_strategy);
        let embedding_model = update
            .embedding_model
            .unwrap_or_else(|| self.embedding_model.clone());
        let ai_model = update.ai_model.unwrap_or_else(|| self.ai_model.clone());
        let chunk_size = update.chunk_size.unwrap_or(self.chunk_size);
        let chunk_overlap = update.chunk_overlap.unwrap_or(self.chunk_overlap);
        let max_context_chunks = update.max_context_chunks.unwrap_or(self.max_context_chunks);

        Self::check_membership("parser", &parser, LEGAL_PARSERS)?;
        Self::check_membership("embedding_model", &embedding_model, LEGAL_EMBEDDING_MODELS)?;
        Self::check_membership("ai_model", &ai_model, LEGAL_AI_MODELS)?;

        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&chunk_size) {
            return Err(ConfigValidationError::new(
                "chunk_size",
                format!(
                    "{} is outside the allowed range {}..={}",
                    chunk_size, MIN_CHUNK_SIZE, MAX_CHUNK_SIZE
                ),
            ));
        }
        if !(0..=MAX_CHUNK_OVERLAP).contains(&chunk_overlap) {
            return Err(ConfigValidationError::new(
                "chunk_overlap",
                format!(
                    "{} is outside the allowed range 0..={}",
                    chunk_overlap, MAX_CHUNK_OVERLAP
                ),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(ConfigValidationError::new(
                "chunk_overlap",
                format!(
                    "{} must be smaller than chunk_size {}",
                    chunk_overlap, chunk_size
                ),
            ));
        }
        if !(1..=MAX_CONTEXT_CHUNKS_LIMIT).contains(&max_context_chunks) {
            return Err(ConfigValidationError::new(
                "max_context_chunks",
                format!(
                    "{} is outside the allowed range 1..={}",
                    max_context_chunks, MAX_CONTEXT_CHUNKS_LIMIT
                ),
            ));
        }

        self.parser = parser;
        self.chunking_strategy = chunking_strategy;
        self.embedding_model = embedding_model;
        self.ai_model = ai_model;
        self.chunk_size = chunk_size;
        self.chunk_overlap = chunk_overlap;
        self.max_context_chunks = max_context_chunks;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn check_membership(
        field: &str,
        value: &str,
        legal: &[&str],
    ) -> Result<(), ConfigValidationError> {
        if legal.contains(&value) {
            Ok(())
        } else {
            Err(ConfigValidationError::new(
                field,
                format!("'{}' is not one of {:?}", value, legal),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_their_own_validation() {
        let mut config = RagConfig::default();

        let result = config.apply_update(RagConfigUpdate::default());

        assert!(result.is_ok());
        assert_eq!(config.parser(), "standard");
        assert_eq!(config.chunking_strategy(), ChunkingStrategy::Semantic);
        assert_eq!(config.chunk_size(), 512);
        assert_eq!(config.chunk_overlap(), 64);
        assert_eq!(config.max_context_chunks(), 10);
    }

    #[test]
    fn test_update_applies_all_given_fields() {
        let mut config = RagConfig::default();

        let result = config.apply_update(RagConfigUpdate {
            chunking_strategy: Some(ChunkingStrategy::Hierarchical),
            ai_model: Some("gpt-4o".to_string()),
            chunk_size: Some(1024),
            ..Default::default()
        });

        assert!(result.is_ok());
        assert_eq!(config.chunking_strategy(), ChunkingStrategy::Hierarchical);
        assert_eq!(config.ai_model(), "gpt-4o");
        assert_eq!(config.chunk_size(), 1024);
        // Untouched fields keep their values.
        assert_eq!(config.embedding_model(), "text-embedding-3-small");
    }

    #[test]
    fn test_unknown_model_is_rejected_and_config_untouched() {
        let mut config = RagConfig::default();
        let before = config.clone();

        let result = config.apply_update(RagConfigUpdate {
            ai_model: Some("gpt-99".to_string()),
            chunk_size: Some(2048),
            ..Default::default()
        });

        let err = result.unwrap_err();
        assert_eq!(err.field, "ai_model");
        assert_eq!(config, before);
    }

    #[test]
    fn test_overlap_must_stay_below_chunk_size() {
        let mut config = RagConfig::default();

        let result = config.apply_update(RagConfigUpdate {
            chunk_overlap: Some(512),
            ..Default::default()
        });

        assert_eq!(result.unwrap_err().field, "chunk_overlap");
    }

    #[test]
    fn test_overlap_checked_against_updated_chunk_size() {
        let mut config = RagConfig::default();

        // 100 is legal against the default 512 but not against the new size.
        let result = config.apply_update(RagConfigUpdate {
            chunk_size: Some(96),
            chunk_overlap: Some(100),
            ..Default::default()
        });

        assert_eq!(result.unwrap_err().field, "chunk_overlap");
    }

    #[test]
    fn test_chunk_size_bounds() {
        let mut config = RagConfig::default();

        let too_small = config.apply_update(RagConfigUpdate {
            chunk_size: Some(32),
            ..Default::default()
        });
        assert_eq!(too_small.unwrap_err().field, "chunk_size");

        let too_large = config.apply_update(RagConfigUpdate {
            chunk_size: Some(8192),
            ..Default::default()
        });
        assert_eq!(too_large.unwrap_err().field, "chunk_size");
    }
}

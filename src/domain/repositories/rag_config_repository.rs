use async_trait::async_trait;

use crate::domain::entities::RagConfig;

#[derive(Debug)]
pub enum RagConfigRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for RagConfigRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RagConfigRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for RagConfigRepositoryError {}

#[async_trait]
pub trait RagConfigRepository: Send + Sync {
    /// The stored configuration, or defaults when no row exists yet.
    async fn get(&self) -> Result<RagConfig, RagConfigRepositoryError>;
    async fn save(&self, config: &RagConfig) -> Result<(), RagConfigRepositoryError>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ChatMessage;

#[derive(Debug)]
pub enum ChatMessageRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for ChatMessageRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatMessageRepositoryError::DatabaseError(msg) => {
                write!(f, "Database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ChatMessageRepositoryError {}

#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    async fn save(&self, message: &ChatMessage) -> Result<(), ChatMessageRepositoryError>;
    /// Session history, ordered oldest first by created_at.
    async fn find_by_session_id(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ChatSession;

#[derive(Debug)]
pub enum ChatSessionRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
}

impl std::fmt::Display for ChatSessionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatSessionRepositoryError::NotFound(id) => write!(f, "Session not found: {}", id),
            ChatSessionRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ChatSessionRepositoryError {}

/// Deleting a session is a deactivation, so history stays auditable;
/// `find_by_user_id` returns active sessions only, newest activity first.
#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    async fn save(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError>;
    async fn find_by_id(&self, id: Uuid)
        -> Result<Option<ChatSession>, ChatSessionRepositoryError>;
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ChatSession>, ChatSessionRepositoryError>;
    async fn update(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError>;
}

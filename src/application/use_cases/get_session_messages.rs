use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::ChatMessage;
use crate::domain::repositories::{ChatMessageRepository, ChatSessionRepository};
use crate::domain::value_objects::SourceReference;

#[derive(Debug)]
pub enum GetSessionMessagesError {
    SessionNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for GetSessionMessagesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetSessionMessagesError::SessionNotFound(id) => {
                write!(f, "Session not found: {}", id)
            }
            GetSessionMessagesError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GetSessionMessagesError {}

#[derive(Debug, Clone)]
pub struct GetSessionMessagesRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct MessageResponse {
    pub message_id: Uuid,
    pub role: String,
    pub content: String,
    pub source_references: Vec<SourceReference>,
    pub ai_model_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatMessage> for MessageResponse {
    fn from(message: &ChatMessage) -> Self {
        Self {
            message_id: message.id(),
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            source_references: message.source_references().to_vec(),
            ai_model_used: message.ai_model_used().map(str::to_string),
            created_at: message.created_at(),
        }
    }
}

pub struct GetSessionMessagesUseCase {
    chat_session_repository: Arc<dyn ChatSessionRepository>,
    chat_message_repository: Arc<dyn ChatMessageRepository>,
}

impl GetSessionMessagesUseCase {
    pub fn new(
        chat_session_repository: Arc<dyn ChatSessionRepository>,
        chat_message_repository: Arc<dyn ChatMessageRepository>,
    ) -> Self {
        Self {
            chat_session_repository,
            chat_message_repository,
        }
    }

    /// History stays readable for deactivated sessions; only a session
    /// that never existed is a 404.
    pub async fn execute(
        &self,
        request: GetSessionMessagesRequest,
    ) -> Result<Vec<MessageResponse>, GetSessionMessagesError> {
        self.chat_session_repository
            .find_by_id(request.session_id)
            .await
            .map_err(|e| GetSessionMessagesError::RepositoryError(e.to_string()))?
            .ok_or(GetSessionMessagesError::SessionNotFound(request.session_id))?;

        let messages = self
            .chat_message_repository
            .find_by_session_id(request.session_id)
            .await
            .map_err(|e| GetSessionMessagesError::RepositoryError(e.to_string()))?;

        Ok(messages.iter().map(MessageResponse::from).collect())
    }
}

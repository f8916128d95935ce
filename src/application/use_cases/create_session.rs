use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::ChatSession;
use crate::domain::repositories::ChatSessionRepository;

#[derive(Debug)]
pub enum CreateSessionError {
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for CreateSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateSessionError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            CreateSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CreateSessionError {}

#[derive(Debug, Clone)]
pub struct CreateSessionRequest {
    pub user_id: Uuid,
    pub session_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub session_name: String,
    pub created_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
}

impl From<&ChatSession> for SessionResponse {
    fn from(session: &ChatSession) -> Self {
        Self {
            session_id: session.id(),
            user_id: session.user_id(),
            session_name: session.session_name().to_string(),
            created_at: session.created_at(),
            last_message_at: session.last_message_at(),
        }
    }
}

pub struct CreateSessionUseCase {
    chat_session_repository: Arc<dyn ChatSessionRepository>,
}

impl CreateSessionUseCase {
    pub fn new(chat_session_repository: Arc<dyn ChatSessionRepository>) -> Self {
        Self {
            chat_session_repository,
        }
    }

    pub async fn execute(
        &self,
        request: CreateSessionRequest,
    ) -> Result<SessionResponse, CreateSessionError> {
        if request.user_id.is_nil() {
            return Err(CreateSessionError::ValidationError(
                "user_id must not be nil".to_string(),
            ));
        }

        let session = ChatSession::new(request.user_id, request.session_name);
        self.chat_session_repository
            .save(&session)
            .await
            .map_err(|e| CreateSessionError::RepositoryError(e.to_string()))?;

        Ok(SessionResponse::from(&session))
    }
}

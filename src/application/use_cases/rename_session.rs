use std::sync::Arc;

use uuid::Uuid;

use crate::application::use_cases::create_session::SessionResponse;
use crate::domain::repositories::ChatSessionRepository;

#[derive(Debug)]
pub enum RenameSessionError {
    SessionNotFound(Uuid),
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for RenameSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenameSessionError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            RenameSessionError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            RenameSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RenameSessionError {}

#[derive(Debug, Clone)]
pub struct RenameSessionRequest {
    pub session_id: Uuid,
    pub session_name: String,
}

pub struct RenameSessionUseCase {
    chat_session_repository: Arc<dyn ChatSessionRepository>,
}

impl RenameSessionUseCase {
    pub fn new(chat_session_repository: Arc<dyn ChatSessionRepository>) -> Self {
        Self {
            chat_session_repository,
        }
    }

    pub async fn execute(
        &self,
        request: RenameSessionRequest,
    ) -> Result<SessionResponse, RenameSessionError> {
        if request.session_name.trim().is_empty() {
            return Err(RenameSessionError::ValidationError(
                "session_name must not be empty".to_string(),
            ));
        }

        let mut session = self
            .chat_session_repository
            .find_by_id(request.session_id)
            .await
            .map_err(|e| RenameSessionError::RepositoryError(e.to_string()))?
            .filter(|session| session.is_active())
            .ok_or(RenameSessionError::SessionNotFound(request.session_id))?;

        session.rename(request.session_name);
        self.chat_session_repository
            .update(&session)
            .await
            .map_err(|e| RenameSessionError::RepositoryError(e.to_string()))?;

        Ok(SessionResponse::from(&session))
    }
}

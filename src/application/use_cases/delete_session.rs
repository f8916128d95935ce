use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repositories::ChatSessionRepository;

#[derive(Debug)]
pub enum DeleteSessionError {
    SessionNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteSessionError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            DeleteSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteSessionError {}

#[derive(Debug, Clone)]
pub struct DeleteSessionRequest {
    pub session_id: Uuid,
}

/// Deletion deactivates the session; messages stay in place for audit.
pub struct DeleteSessionUseCase {
    chat_session_repository: Arc<dyn ChatSessionRepository>,
}

impl DeleteSessionUseCase {
    pub fn new(chat_session_repository: Arc<dyn ChatSessionRepository>) -> Self {
        Self {
            chat_session_repository,
        }
    }

    pub async fn execute(&self, request: DeleteSessionRequest) -> Result<(), DeleteSessionError> {
        let mut session = self
            .chat_session_repository
            .find_by_id(request.session_id)
            .await
            .map_err(|e| DeleteSessionError::RepositoryError(e.to_string()))?
            .filter(|session| session.is_active())
            .ok_or(DeleteSessionError::SessionNotFound(request.session_id))?;

        session.deactivate();
        self.chat_session_repository
            .update(&session)
            .await
            .map_err(|e| DeleteSessionError::RepositoryError(e.to_string()))?;

        Ok(())
    }
}

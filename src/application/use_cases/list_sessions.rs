use std::sync::Arc;

use uuid::Uuid;

use crate::application::use_cases::create_session::SessionResponse;
use crate::domain::repositories::ChatSessionRepository;

#[derive(Debug)]
pub enum ListSessionsError {
    RepositoryError(String),
}

impl std::fmt::Display for ListSessionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListSessionsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListSessionsError {}

#[derive(Debug, Clone)]
pub struct ListSessionsRequest {
    pub user_id: Uuid,
}

pub struct ListSessionsUseCase {
    chat_session_repository: Arc<dyn ChatSessionRepository>,
}

impl ListSessionsUseCase {
    pub fn new(chat_session_repository: Arc<dyn ChatSessionRepository>) -> Self {
        Self {
            chat_session_repository,
        }
    }

    pub async fn execute(
        &self,
        request: ListSessionsRequest,
    ) -> Result<Vec<SessionResponse>, ListSessionsError> {
        let sessions = self
            .chat_session_repository
            .find_by_user_id(request.user_id)
            .await
            .map_err(|e| ListSessionsError::RepositoryError(e.to_string()))?;

        Ok(sessions.iter().map(SessionResponse::from).collect())
    }
}

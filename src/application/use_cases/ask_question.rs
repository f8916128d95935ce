use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::services::ChatOrchestratorService;
use crate::application::services::chat_orchestrator::{AskError, AskRequest};
use crate::domain::value_objects::{DocumentTypeFilter, SourceReference};

#[derive(Debug)]
pub enum AskQuestionError {
    ValidationError(String),
    SessionNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for AskQuestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AskQuestionError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AskQuestionError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            AskQuestionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for AskQuestionError {}

impl From<AskError> for AskQuestionError {
    fn from(error: AskError) -> Self {
        match error {
            AskError::SessionNotFound(id) => AskQuestionError::SessionNotFound(id),
            AskError::ValidationError(msg) => AskQuestionError::ValidationError(msg),
            AskError::RepositoryError(msg) => AskQuestionError::RepositoryError(msg),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AskQuestionRequest {
    pub question: String,
    pub session_id: Uuid,
    pub model_id: String,
    pub document_type: Option<DocumentTypeFilter>,
    pub quick_search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AskQuestionResponse {
    pub message_id: Uuid,
    pub session_id: Uuid,
    pub answer: String,
    pub source_references: Vec<SourceReference>,
    pub model_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct AskQuestionUseCase {
    chat_orchestrator: Arc<ChatOrchestratorService>,
}

impl AskQuestionUseCase {
    pub fn new(chat_orchestrator: Arc<ChatOrchestratorService>) -> Self {
        Self { chat_orchestrator }
    }

    pub async fn execute(
        &self,
        request: AskQuestionRequest,
    ) -> Result<AskQuestionResponse, AskQuestionError> {
        if request.question.trim().is_empty() {
            return Err(AskQuestionError::ValidationError(
                "question must not be empty".to_string(),
            ));
        }
        if request.model_id.trim().is_empty() {
            return Err(AskQuestionError::ValidationError(
                "model_id must not be empty".to_string(),
            ));
        }

        let answer = self
            .chat_orchestrator
            .ask(AskRequest {
                question: request.question,
                session_id: request.session_id,
                model_id: request.model_id,
                document_type: request.document_type,
                quick_search: request.quick_search,
            })
            .await?;

        Ok(AskQuestionResponse {
            message_id: answer.id(),
            session_id: answer.session_id(),
            answer: answer.content().to_string(),
            source_references: answer.source_references().to_vec(),
            model_used: answer.ai_model_used().map(str::to_string),
            created_at: answer.created_at(),
        })
    }
}

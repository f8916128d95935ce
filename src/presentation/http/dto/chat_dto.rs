use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{DocumentTypeFilter, SourceReference};

/// `document_type` accepts either a registry id (number) or a display name
/// (string); the untagged filter enum sorts that out during deserialization.
#[derive(Debug, Deserialize)]
pub struct AskRequestDto {
    pub question: String,
    pub session_id: Uuid,
    pub model_id: String,
    pub document_type: Option<DocumentTypeFilter>,
    pub quick_search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponseDto {
    pub message_id: Uuid,
    pub session_id: Uuid,
    pub answer: String,
    pub source_references: Vec<SourceReferenceDto>,
    pub model_used: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct SourceReferenceDto {
    pub chunk_id: String,
    pub score: f32,
}

impl From<SourceReference> for SourceReferenceDto {
    fn from(reference: SourceReference) -> Self {
        Self {
            chunk_id: reference.chunk_id,
            score: reference.score,
        }
    }
}

impl From<crate::application::use_cases::ask_question::AskQuestionResponse> for AskResponseDto {
    fn from(response: crate::application::use_cases::ask_question::AskQuestionResponse) -> Self {
        Self {
            message_id: response.message_id,
            session_id: response.session_id,
            answer: response.answer,
            source_references: response
                .source_references
                .into_iter()
                .map(SourceReferenceDto::from)
                .collect(),
            model_used: response.model_used,
            created_at: response.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequestDto {
    pub user_id: Uuid,
    pub session_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionListQueryDto {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RenameSessionRequestDto {
    pub session_name: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponseDto {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub session_name: String,
    pub created_at: String,
    pub last_message_at: Option<String>,
}

impl From<crate::application::use_cases::create_session::SessionResponse> for SessionResponseDto {
    fn from(response: crate::application::use_cases::create_session::SessionResponse) -> Self {
        Self {
            session_id: response.session_id,
            user_id: response.user_id,
            session_name: response.session_name,
            created_at: response.created_at.to_rfc3339(),
            last_message_at: response.last_message_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionListResponseDto {
    pub sessions: Vec<SessionResponseDto>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub message_id: Uuid,
    pub role: String,
    pub content: String,
    pub source_references: Vec<SourceReferenceDto>,
    pub ai_model_used: Option<String>,
    pub created_at: String,
}

impl From<crate::application::use_cases::get_session_messages::MessageResponse> for MessageDto {
    fn from(response: crate::application::use_cases::get_session_messages::MessageResponse) -> Self {
        Self {
            message_id: response.message_id,
            role: response.role,
            content: response.content,
            source_references: response
                .source_references
                .into_iter()
                .map(SourceReferenceDto::from)
                .collect(),
            ai_model_used: response.ai_model_used,
            created_at: response.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageListResponseDto {
    pub session_id: Uuid,
    pub messages: Vec<MessageDto>,
    pub total: usize,
}

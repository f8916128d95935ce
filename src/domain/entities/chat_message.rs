use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{MessageRole, SourceReference};

/// One turn in a chat session. Messages are append-only: once persisted
/// they are never edited, so history reads stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: Uuid,
    session_id: Uuid,
    role: MessageRole,
    content: String,
    source_references: Vec<SourceReference>,
    ai_model_used: Option<String>,
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// A user turn. User messages never carry sources or a model name.
    pub fn user(session_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            role: MessageRole::User,
            content,
            source_references: Vec::new(),
            ai_model_used: None,
            created_at: Utc::now(),
        }
    }

    /// An assistant turn, with the chunks that grounded the answer.
    pub fn assistant(
        session_id: Uuid,
        content: String,
        source_references: Vec<SourceReference>,
        ai_model_used: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            role: MessageRole::Assistant,
            content,
            source_references,
            ai_model_used: Some(ai_model_used),
            created_at: Utc::now(),
        }
    }

    /// Reconstruct from database values (for repository use).
    pub fn from_database(
        id: Uuid,
        session_id: Uuid,
        role: MessageRole,
        content: String,
        source_references: Vec<SourceReference>,
        ai_model_used: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            role,
            content,
            source_references,
            ai_model_used,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source_references(&self) -> &[SourceReference] {
        &self.source_references
    }

    pub fn ai_model_used(&self) -> Option<&str> {
        self.ai_model_used.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_grounded(&self) -> bool {
        !self.source_references.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_has_no_sources_or_model() {
        let message = ChatMessage::user(Uuid::new_v4(), "What does SOP-104 require?".to_string());

        assert!(message.role().is_user());
        assert!(message.source_references().is_empty());
        assert!(message.ai_model_used().is_none());
        assert!(!message.is_grounded());
    }

    #[test]
    fn test_assistant_message_carries_sources_and_model() {
        let refs = vec![SourceReference {
            chunk_id: "doc-abc-p1-c0".to_string(),
            score: 0.87,
        }];
        let message = ChatMessage::assistant(
            Uuid::new_v4(),
            "SOP-104 requires weekly calibration.".to_string(),
            refs,
            "gpt-4o-mini".to_string(),
        );

        assert!(message.role().is_assistant());
        assert!(message.is_grounded());
        assert_eq!(message.ai_model_used(), Some("gpt-4o-mini"));
        assert_eq!(message.source_references()[0].chunk_id, "doc-abc-p1-c0");
    }

    #[test]
    fn test_assistant_message_may_be_ungrounded() {
        let message = ChatMessage::assistant(
            Uuid::new_v4(),
            "I could not find anything relevant.".to_string(),
            Vec::new(),
            "gpt-4o-mini".to_string(),
        );

        assert!(!message.is_grounded());
    }
}

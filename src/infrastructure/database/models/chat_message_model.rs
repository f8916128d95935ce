use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ChatMessage;
use crate::domain::value_objects::{MessageRole, SourceReference};
use crate::infrastructure::database::schema::chat_messages;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatMessageModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: String,
    pub content: String,
    pub source_references: serde_json::Value,
    pub ai_model_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatMessageModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: String,
    pub content: String,
    pub source_references: serde_json::Value,
    pub ai_model_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatMessage> for NewChatMessageModel {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id(),
            session_id: message.session_id(),
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            source_references: serde_json::to_value(message.source_references())
                .unwrap_or_else(|_| serde_json::Value::Array(Vec::new())),
            ai_model_used: message.ai_model_used().map(|m| m.to_string()),
            created_at: message.created_at(),
        }
    }
}

impl TryFrom<ChatMessageModel> for ChatMessage {
    type Error = String;

    fn try_from(model: ChatMessageModel) -> Result<Self, Self::Error> {
        let role = MessageRole::from_str(&model.role)?;

        let source_references: Vec<SourceReference> =
            serde_json::from_value(model.source_references)
                .map_err(|e| format!("Invalid source references: {}", e))?;

        Ok(ChatMessage::from_database(
            model.id,
            model.session_id,
            role,
            model.content,
            source_references,
            model.ai_model_used,
            model.created_at,
        ))
    }
}

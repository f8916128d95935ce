use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ChatSession;
use crate::infrastructure::database::schema::chat_sessions;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatSessionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatSessionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
}

impl From<&ChatSession> for NewChatSessionModel {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id(),
            user_id: session.user_id(),
            session_name: session.session_name().to_string(),
            is_active: session.is_active(),
            created_at: session.created_at(),
            last_message_at: session.last_message_at(),
        }
    }
}

impl From<ChatSessionModel> for ChatSession {
    fn from(model: ChatSessionModel) -> Self {
        ChatSession::from_database(
            model.id,
            model.user_id,
            model.session_name,
            model.is_active,
            model.created_at,
            model.last_message_at,
        )
    }
}

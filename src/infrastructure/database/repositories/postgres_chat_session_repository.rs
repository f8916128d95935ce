use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ChatSession;
use crate::domain::repositories::{
    ChatSessionRepository, chat_session_repository::ChatSessionRepositoryError,
};
use crate::infrastructure::database::DbPool;
use crate::infrastructure::database::get_connection_from_pool;
use crate::infrastructure::database::models::{ChatSessionModel, NewChatSessionModel};
use crate::infrastructure::database::schema::chat_sessions::dsl::*;

pub struct PostgresChatSessionRepository {
    pool: DbPool,
}

impl PostgresChatSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatSessionRepository for PostgresChatSessionRepository {
    async fn save(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        let new_session = NewChatSessionModel::from(session);

        diesel::insert_into(chat_sessions)
            .values(&new_session)
            .execute(&mut conn)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: Uuid,
    ) -> Result<Option<ChatSession>, ChatSessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        let result = chat_sessions
            .find(session_id)
            .first::<ChatSessionModel>(&mut conn)
            .optional()
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(ChatSession::from))
    }

    async fn find_by_user_id(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<ChatSession>, ChatSessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        let models = chat_sessions
            .filter(user_id.eq(owner_id))
            .filter(is_active.eq(true))
            .order((last_message_at.desc().nulls_last(), created_at.desc()))
            .load::<ChatSessionModel>(&mut conn)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(ChatSession::from).collect())
    }

    async fn update(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        let changes = NewChatSessionModel::from(session);

        let updated = diesel::update(chat_sessions.find(session.id()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        if updated == 0 {
            return Err(ChatSessionRepositoryError::NotFound(session.id()));
        }

        Ok(())
    }
}

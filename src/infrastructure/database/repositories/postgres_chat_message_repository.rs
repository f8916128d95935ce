use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ChatMessage;
use crate::domain::repositories::{
    ChatMessageRepository, chat_message_repository::ChatMessageRepositoryError,
};
use crate::infrastructure::database::DbPool;
use crate::infrastructure::database::get_connection_from_pool;
use crate::infrastructure::database::models::{ChatMessageModel, NewChatMessageModel};
use crate::infrastructure::database::schema::chat_messages::dsl::*;

pub struct PostgresChatMessageRepository {
    pool: DbPool,
}

impl PostgresChatMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepository for PostgresChatMessageRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), ChatMessageRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatMessageRepositoryError::DatabaseError(e.to_string()))?;

        let new_message = NewChatMessageModel::from(message);

        diesel::insert_into(chat_messages)
            .values(&new_message)
            .execute(&mut conn)
            .map_err(|e| ChatMessageRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_session_id(
        &self,
        owner_session_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatMessageRepositoryError::DatabaseError(e.to_string()))?;

        let models = chat_messages
            .filter(session_id.eq(owner_session_id))
            .order(created_at.asc())
            .load::<ChatMessageModel>(&mut conn)
            .map_err(|e| ChatMessageRepositoryError::DatabaseError(e.to_string()))?;

        models
            .into_iter()
            .map(|model| {
                ChatMessage::try_from(model)
                    .map_err(ChatMessageRepositoryError::DatabaseError)
            })
            .collect()
    }
}

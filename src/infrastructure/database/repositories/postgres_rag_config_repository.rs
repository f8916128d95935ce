use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::RagConfig;
use crate::domain::repositories::{
    RagConfigRepository, rag_config_repository::RagConfigRepositoryError,
};
use crate::infrastructure::database::DbPool;
use crate::infrastructure::database::get_connection_from_pool;
use crate::infrastructure::database::models::{
    NewRagConfigModel, RAG_CONFIG_ROW_ID, RagConfigModel,
};
use crate::infrastructure::database::schema::rag_config::dsl::*;

pub struct PostgresRagConfigRepository {
    pool: DbPool,
}

impl PostgresRagConfigRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RagConfigRepository for PostgresRagConfigRepository {
    /// A missing row yields the built-in defaults; the row appears on the
    /// first save.
    async fn get(&self) -> Result<RagConfig, RagConfigRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RagConfigRepositoryError::DatabaseError(e.to_string()))?;

        let result = rag_config
            .find(RAG_CONFIG_ROW_ID)
            .first::<RagConfigModel>(&mut conn)
            .optional()
            .map_err(|e| RagConfigRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                RagConfig::try_from(model).map_err(RagConfigRepositoryError::DatabaseError)
            }
            None => Ok(RagConfig::default()),
        }
    }

    async fn save(&self, config: &RagConfig) -> Result<(), RagConfigRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RagConfigRepositoryError::DatabaseError(e.to_string()))?;

        let row = NewRagConfigModel::from(config);

        diesel::insert_into(rag_config)
            .values(&row)
            .on_conflict(id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .map_err(|e| RagConfigRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

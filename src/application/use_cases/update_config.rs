use std::sync::Arc;

use crate::application::use_cases::get_config::ConfigResponse;
use crate::domain::entities::RagConfigUpdate;
use crate::domain::repositories::RagConfigRepository;

#[derive(Debug)]
pub enum UpdateConfigError {
    ValidationError { field: String, message: String },
    RepositoryError(String),
}

impl std::fmt::Display for UpdateConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateConfigError::ValidationError { field, message } => {
                write!(f, "Invalid {}: {}", field, message)
            }
            UpdateConfigError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UpdateConfigError {}

pub struct UpdateConfigUseCase {
    rag_config_repository: Arc<dyn RagConfigRepository>,
}

impl UpdateConfigUseCase {
    pub fn new(rag_config_repository: Arc<dyn RagConfigRepository>) -> Self {
        Self {
            rag_config_repository,
        }
    }

    /// A rejected update leaves the stored config untouched.
    pub async fn execute(
        &self,
        update: RagConfigUpdate,
    ) -> Result<ConfigResponse, UpdateConfigError> {
        let mut config = self
            .rag_config_repository
            .get()
            .await
            .map_err(|e| UpdateConfigError::RepositoryError(e.to_string()))?;

        config
            .apply_update(update)
            .map_err(|e| UpdateConfigError::ValidationError {
                field: e.field,
                message: e.message,
            })?;

        self.rag_config_repository
            .save(&config)
            .await
            .map_err(|e| UpdateConfigError::RepositoryError(e.to_string()))?;

        Ok(ConfigResponse::from(&config))
    }
}

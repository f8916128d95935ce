use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::{
    GetConfigUseCase, UpdateConfigUseCase, update_config::UpdateConfigError,
};
use crate::presentation::http::dto::{ApiResponse, ConfigResponseDto, UpdateConfigRequestDto};

pub struct ConfigHandler {
    get_config_use_case: Arc<GetConfigUseCase>,
    update_config_use_case: Arc<UpdateConfigUseCase>,
}

impl ConfigHandler {
    pub fn new(
        get_config_use_case: Arc<GetConfigUseCase>,
        update_config_use_case: Arc<UpdateConfigUseCase>,
    ) -> Self {
        Self {
            get_config_use_case,
            update_config_use_case,
        }
    }

    pub async fn get_config(
        State(handler): State<Arc<ConfigHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.get_config_use_case.execute().await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<ConfigResponseDto>::success(
                    ConfigResponseDto::from(response),
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "INTERNAL_ERROR".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    /// Rejected fields leave the stored config untouched; the offending
    /// field name travels in the error details.
    pub async fn update_config(
        State(handler): State<Arc<ConfigHandler>>,
        Json(payload): Json<UpdateConfigRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let update = match payload.into_update() {
            Ok(update) => update,
            Err(message) => {
                return Ok((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(
                        "VALIDATION_ERROR".to_string(),
                        message,
                        Some("chunking_strategy".to_string()),
                    )),
                ));
            }
        };

        match handler.update_config_use_case.execute(update).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<ConfigResponseDto>::success(
                    ConfigResponseDto::from(response),
                )),
            )),
            Err(UpdateConfigError::ValidationError { field, message }) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "VALIDATION_ERROR".to_string(),
                    message,
                    Some(field),
                )),
            )),
            Err(UpdateConfigError::RepositoryError(message)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "INTERNAL_ERROR".to_string(),
                    message,
                    None,
                )),
            )),
        }
    }
}

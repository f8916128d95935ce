use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    GetIndexStatusUseCase, IndexDocumentUseCase,
    get_index_status::GetIndexStatusRequest,
    index_document::{IndexDocumentError, IndexDocumentRequest},
};
use crate::presentation::http::dto::{
    ApiResponse, IndexRequestDto, IndexResponseDto, IndexStatusResponseDto,
};

pub struct IndexHandler {
    index_document_use_case: Arc<IndexDocumentUseCase>,
    get_index_status_use_case: Arc<GetIndexStatusUseCase>,
}

impl IndexHandler {
    pub fn new(
        index_document_use_case: Arc<IndexDocumentUseCase>,
        get_index_status_use_case: Arc<GetIndexStatusUseCase>,
    ) -> Self {
        Self {
            index_document_use_case,
            get_index_status_use_case,
        }
    }

    /// Pipeline failures come back as a `success: false` body with HTTP 200;
    /// only a malformed request is a 400.
    pub async fn index_document(
        State(handler): State<Arc<IndexHandler>>,
        Json(payload): Json<IndexRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = IndexDocumentRequest {
            source_document_id: payload.source_document_id,
            document_type: payload.document_type,
        };

        match handler.index_document_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<IndexResponseDto>::success(
                    IndexResponseDto::from(response),
                )),
            )),
            Err(IndexDocumentError::ValidationError(message)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "VALIDATION_ERROR".to_string(),
                    message,
                    None,
                )),
            )),
        }
    }

    pub async fn get_index_status(
        State(handler): State<Arc<IndexHandler>>,
        Path(source_document_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = GetIndexStatusRequest { source_document_id };

        match handler.get_index_status_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<IndexStatusResponseDto>::success(
                    IndexStatusResponseDto::from_response(source_document_id, response),
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "STATUS_LOOKUP_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    AskQuestionUseCase, CreateSessionUseCase, DeleteSessionUseCase, GetSessionMessagesUseCase,
    ListSessionsUseCase, RenameSessionUseCase,
    ask_question::{AskQuestionError, AskQuestionRequest},
    create_session::{CreateSessionError, CreateSessionRequest},
    delete_session::{DeleteSessionError, DeleteSessionRequest},
    get_session_messages::{GetSessionMessagesError, GetSessionMessagesRequest},
    list_sessions::ListSessionsRequest,
    rename_session::{RenameSessionError, RenameSessionRequest},
};
use crate::presentation::http::dto::{
    ApiResponse, AskRequestDto, AskResponseDto, CreateSessionRequestDto, MessageDto,
    MessageListResponseDto, MessageResponseDto, RenameSessionRequestDto, SessionListQueryDto,
    SessionListResponseDto, SessionResponseDto,
};

pub struct ChatHandler {
    ask_question_use_case: Arc<AskQuestionUseCase>,
    create_session_use_case: Arc<CreateSessionUseCase>,
    list_sessions_use_case: Arc<ListSessionsUseCase>,
    rename_session_use_case: Arc<RenameSessionUseCase>,
    delete_session_use_case: Arc<DeleteSessionUseCase>,
    get_session_messages_use_case: Arc<GetSessionMessagesUseCase>,
}

impl ChatHandler {
    pub fn new(
        ask_question_use_case: Arc<AskQuestionUseCase>,
        create_session_use_case: Arc<CreateSessionUseCase>,
        list_sessions_use_case: Arc<ListSessionsUseCase>,
        rename_session_use_case: Arc<RenameSessionUseCase>,
        delete_session_use_case: Arc<DeleteSessionUseCase>,
        get_session_messages_use_case: Arc<GetSessionMessagesUseCase>,
    ) -> Self {
        Self {
            ask_question_use_case,
            create_session_use_case,
            list_sessions_use_case,
            rename_session_use_case,
            delete_session_use_case,
            get_session_messages_use_case,
        }
    }

    pub async fn ask_question(
        State(handler): State<Arc<ChatHandler>>,
        Json(payload): Json<AskRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = AskQuestionRequest {
            question: payload.question,
            session_id: payload.session_id,
            model_id: payload.model_id,
            document_type: payload.document_type,
            quick_search: payload.quick_search,
        };

        match handler.ask_question_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<AskResponseDto>::success(AskResponseDto::from(
                    response,
                ))),
            )),
            Err(AskQuestionError::ValidationError(message)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "VALIDATION_ERROR".to_string(),
                    message,
                    None,
                )),
            )),
            Err(AskQuestionError::SessionNotFound(session_id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Chat session {} not found", session_id),
                    None,
                )),
            )),
            Err(AskQuestionError::RepositoryError(message)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "INTERNAL_ERROR".to_string(),
                    message,
                    None,
                )),
            )),
        }
    }

    pub async fn create_session(
        State(handler): State<Arc<ChatHandler>>,
        Json(payload): Json<CreateSessionRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = CreateSessionRequest {
            user_id: payload.user_id,
            session_name: payload.session_name,
        };

        match handler.create_session_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::CREATED,
                Json(ApiResponse::<SessionResponseDto>::success(
                    SessionResponseDto::from(response),
                )),
            )),
            Err(CreateSessionError::ValidationError(message)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "VALIDATION_ERROR".to_string(),
                    message,
                    None,
                )),
            )),
            Err(CreateSessionError::RepositoryError(message)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "INTERNAL_ERROR".to_string(),
                    message,
                    None,
                )),
            )),
        }
    }

    pub async fn list_sessions(
        State(handler): State<Arc<ChatHandler>>,
        Query(params): Query<SessionListQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = ListSessionsRequest {
            user_id: params.user_id,
        };

        match handler.list_sessions_use_case.execute(request).await {
            Ok(sessions) => {
                let sessions: Vec<SessionResponseDto> =
                    sessions.into_iter().map(SessionResponseDto::from).collect();
                let total = sessions.len();
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::<SessionListResponseDto>::success(
                        SessionListResponseDto { sessions, total },
                    )),
                ))
            }
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

    pub async fn rename_session(
        State(handler): State<Arc<ChatHandler>>,
        Path(session_id): Path<Uuid>,
        Json(payload): Json<RenameSessionRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = RenameSessionRequest {
            session_id,
            session_name: payload.session_name,
        };

        match handler.rename_session_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<SessionResponseDto>::success(
                    SessionResponseDto::from(response),
                )),
            )),
            Err(RenameSessionError::SessionNotFound(session_id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Chat session {} not found", session_id),
                    None,
                )),
            )),
            Err(RenameSessionError::ValidationError(message)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "VALIDATION_ERROR".to_string(),
                    message,
                    None,
                )),
            )),
            Err(RenameSessionError::RepositoryError(message)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "INTERNAL_ERROR".to_string(),
                    message,
                    None,
                )),
            )),
        }
    }

    pub async fn delete_session(
        State(handler): State<Arc<ChatHandler>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = DeleteSessionRequest { session_id };

        match handler.delete_session_use_case.execute(request).await {
            Ok(()) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<MessageResponseDto>::success(
                    MessageResponseDto {
                        message: format!("Chat session {} deleted", session_id),
                    },
                )),
            )),
            Err(DeleteSessionError::SessionNotFound(session_id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Chat session {} not found", session_id),
                    None,
                )),
            )),
            Err(DeleteSessionError::RepositoryError(message)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "INTERNAL_ERROR".to_string(),
                    message,
                    None,
                )),
            )),
        }
    }

    pub async fn get_session_messages(
        State(handler): State<Arc<ChatHandler>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = GetSessionMessagesRequest { session_id };

        match handler.get_session_messages_use_case.execute(request).await {
            Ok(messages) => {
                let messages: Vec<MessageDto> =
                    messages.into_iter().map(MessageDto::from).collect();
                let total = messages.len();
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::<MessageListResponseDto>::success(
                        MessageListResponseDto {
                            session_id,
                            messages,
                            total,
                        },
                    )),
                ))
            }
            Err(GetSessionMessagesError::SessionNotFound(session_id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Chat session {} not found", session_id),
                    None,
                )),
            )),
            Err(GetSessionMessagesError::RepositoryError(message)) => Ok((
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

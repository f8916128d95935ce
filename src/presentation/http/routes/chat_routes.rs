use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/chat/ask", post(ChatHandler::ask_question))
        .route("/chat/sessions", post(ChatHandler::create_session))
        .route("/chat/sessions", get(ChatHandler::list_sessions))
        .route(
            "/chat/sessions/{session_id}",
            patch(ChatHandler::rename_session),
        )
        .route(
            "/chat/sessions/{session_id}",
            delete(ChatHandler::delete_session),
        )
        .route(
            "/chat/sessions/{session_id}/messages",
            get(ChatHandler::get_session_messages),
        )
        .with_state(chat_handler)
}

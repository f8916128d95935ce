use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::IndexHandler;

pub fn index_routes(index_handler: Arc<IndexHandler>) -> Router {
    Router::new()
        .route("/index", post(IndexHandler::index_document))
        .route(
            "/index/{source_document_id}",
            get(IndexHandler::get_index_status),
        )
        .with_state(index_handler)
}

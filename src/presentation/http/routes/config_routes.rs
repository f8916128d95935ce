use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ConfigHandler;

pub fn config_routes(config_handler: Arc<ConfigHandler>) -> Router {
    Router::new()
        .route("/config", get(ConfigHandler::get_config))
        .route("/config", put(ConfigHandler::update_config))
        .with_state(config_handler)
}

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::messaging::BroadcastEventBus;
use crate::presentation::http::{
    handlers::{ChatHandler, ConfigHandler, IndexHandler},
    routes::{chat_routes, config_routes, health_routes, index_routes},
};

pub struct HttpServer {
    index_handler: Arc<IndexHandler>,
    chat_handler: Arc<ChatHandler>,
    config_handler: Arc<ConfigHandler>,
    event_bus: Arc<BroadcastEventBus>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        index_handler: Arc<IndexHandler>,
        chat_handler: Arc<ChatHandler>,
        config_handler: Arc<ConfigHandler>,
        event_bus: Arc<BroadcastEventBus>,
        port: Option<u16>,
    ) -> Self {
        Self {
            index_handler,
            chat_handler,
            config_handler,
            event_bus,
            port: port.unwrap_or(3000),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        // Start the event log subscriber before accepting traffic
        self.event_bus.spawn_logging_subscriber();

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .merge(health_routes())
            .merge(index_routes(self.index_handler.clone()))
            .merge(chat_routes(self.chat_handler.clone()))
            .merge(config_routes(self.config_handler.clone()))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024)) // 2MB cap
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

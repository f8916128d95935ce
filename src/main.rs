use tracing_subscriber::EnvFilter;

mod application;
mod domain;
mod infrastructure;
mod presentation;

use infrastructure::AppContainer;
use presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: Option<u16> = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok());

    let container = AppContainer::new().await?;

    tracing::info!("Starting qmrag on port {}", port.unwrap_or(3000));

    let server = HttpServer::new(
        container.index_handler.clone(),
        container.chat_handler.clone(),
        container.config_handler.clone(),
        container.event_bus.clone(),
        port,
    );

    server.run().await
}

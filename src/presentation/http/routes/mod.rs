pub mod chat_routes;
pub mod config_routes;
pub mod health_routes;
pub mod index_routes;

pub use chat_routes::*;
pub use config_routes::*;
pub use health_routes::*;
pub use index_routes::*;

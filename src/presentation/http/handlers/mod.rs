pub mod chat_handler;
pub mod config_handler;
pub mod index_handler;

pub use chat_handler::ChatHandler;
pub use config_handler::ConfigHandler;
pub use index_handler::IndexHandler;

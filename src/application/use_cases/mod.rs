pub mod ask_question;
pub mod create_session;
pub mod delete_session;
pub mod get_config;
pub mod get_index_status;
pub mod get_session_messages;
pub mod index_document;
pub mod list_sessions;
pub mod rename_session;
pub mod update_config;

pub use ask_question::AskQuestionUseCase;
pub use create_session::CreateSessionUseCase;
pub use delete_session::DeleteSessionUseCase;
pub use get_config::GetConfigUseCase;
pub use get_index_status::GetIndexStatusUseCase;
pub use get_session_messages::GetSessionMessagesUseCase;
pub use index_document::IndexDocumentUseCase;
pub use list_sessions::ListSessionsUseCase;
pub use rename_session::RenameSessionUseCase;
pub use update_config::UpdateConfigUseCase;

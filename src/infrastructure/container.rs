use std::{sync::Arc, time::Duration};

use crate::{
    application::{
        ports::{
            AnswerGenerator, DocumentTypeRegistry, EmbeddingService, EventPublisher,
            PageContentSource, QueryExpander, VectorStore,
        },
        services::{
            ChatOrchestratorService, ChunkExtractor, DocumentIndexerService, RetrievalService,
            retrieval::RetrievalTuning,
        },
        use_cases::{
            AskQuestionUseCase, CreateSessionUseCase, DeleteSessionUseCase, GetConfigUseCase,
            GetIndexStatusUseCase, GetSessionMessagesUseCase, IndexDocumentUseCase,
            ListSessionsUseCase, RenameSessionUseCase, UpdateConfigUseCase,
        },
    },
    domain::repositories::{
        ChatMessageRepository, ChatSessionRepository, DocumentChunkRepository,
        IndexedDocumentRepository, RagConfigRepository,
    },
    infrastructure::{
        database::{
            create_connection_pool, get_connection_from_pool,
            repositories::{
                PostgresChatMessageRepository, PostgresChatSessionRepository,
                PostgresDocumentChunkRepository, PostgresIndexedDocumentRepository,
                PostgresRagConfigRepository,
            },
            run_migrations,
        },
        external_services::{
            ChatClient, HttpPageContentSource, LlmQueryExpander, OpenAiAnswerGenerator,
            QdrantVectorStore, RemoteEmbeddingService, StaticDocumentTypeRegistry,
            embeddings_client::EmbeddingsClientConfig,
        },
        messaging::BroadcastEventBus,
    },
    presentation::http::handlers::{ChatHandler, ConfigHandler, IndexHandler},
};

pub struct AppContainer {
    // Repositories
    pub indexed_document_repository: Arc<dyn IndexedDocumentRepository>,
    pub document_chunk_repository: Arc<dyn DocumentChunkRepository>,
    pub chat_session_repository: Arc<dyn ChatSessionRepository>,
    pub chat_message_repository: Arc<dyn ChatMessageRepository>,
    pub rag_config_repository: Arc<dyn RagConfigRepository>,

    // External Services
    pub embedding_service: Arc<dyn EmbeddingService>,
    pub vector_store: Arc<dyn VectorStore>,
    pub answer_generator: Arc<dyn AnswerGenerator>,
    pub query_expander: Arc<dyn QueryExpander>,
    pub page_content_source: Arc<dyn PageContentSource>,
    pub type_registry: Arc<dyn DocumentTypeRegistry>,

    // Messaging
    pub event_bus: Arc<BroadcastEventBus>,

    // Application Services
    pub document_indexer: Arc<DocumentIndexerService>,
    pub retrieval_service: Arc<RetrievalService>,
    pub chat_orchestrator: Arc<ChatOrchestratorService>,

    // Use Cases
    pub index_document_use_case: Arc<IndexDocumentUseCase>,
    pub get_index_status_use_case: Arc<GetIndexStatusUseCase>,
    pub ask_question_use_case: Arc<AskQuestionUseCase>,
    pub create_session_use_case: Arc<CreateSessionUseCase>,
    pub list_sessions_use_case: Arc<ListSessionsUseCase>,
    pub rename_session_use_case: Arc<RenameSessionUseCase>,
    pub delete_session_use_case: Arc<DeleteSessionUseCase>,
    pub get_session_messages_use_case: Arc<GetSessionMessagesUseCase>,
    pub get_config_use_case: Arc<GetConfigUseCase>,
    pub update_config_use_case: Arc<UpdateConfigUseCase>,

    // HTTP Handlers
    pub index_handler: Arc<IndexHandler>,
    pub chat_handler: Arc<ChatHandler>,
    pub config_handler: Arc<ConfigHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Create database connection pool
        let db_pool = create_connection_pool()?;
        let mut conn = get_connection_from_pool(&db_pool)
            .map_err(|e| format!("Failed to get database connection: {}", e))?;
        run_migrations(&mut conn)
            .map_err(|e| format!("Failed to run database migrations: {}", e))?;

        // Create repositories
        let indexed_document_repository: Arc<dyn IndexedDocumentRepository> =
            Arc::new(PostgresIndexedDocumentRepository::new(db_pool.clone()));
        let document_chunk_repository: Arc<dyn DocumentChunkRepository> =
            Arc::new(PostgresDocumentChunkRepository::new(db_pool.clone()));
        let chat_session_repository: Arc<dyn ChatSessionRepository> =
            Arc::new(PostgresChatSessionRepository::new(db_pool.clone()));
        let chat_message_repository: Arc<dyn ChatMessageRepository> =
            Arc::new(PostgresChatMessageRepository::new(db_pool.clone()));
        let rag_config_repository: Arc<dyn RagConfigRepository> =
            Arc::new(PostgresRagConfigRepository::new(db_pool));

        // The stored config picks the embedding model; changing it later
        // requires a restart so index and queries never disagree mid-flight.
        let boot_config = rag_config_repository
            .get()
            .await
            .map_err(|e| format!("Failed to load RAG config: {}", e))?;

        // Create external services
        let embedding_service: Arc<dyn EmbeddingService> = Arc::new(RemoteEmbeddingService::new(
            EmbeddingsClientConfig::with_model(boot_config.embedding_model()),
        )?);

        let vector_store: Arc<dyn VectorStore> = Arc::new(QdrantVectorStore::from_env()?);

        let chat_client = ChatClient::from_env()?;
        let answer_generator: Arc<dyn AnswerGenerator> =
            Arc::new(OpenAiAnswerGenerator::new(chat_client.clone()));
        let query_expander: Arc<dyn QueryExpander> =
            Arc::new(LlmQueryExpander::from_env(chat_client));

        let page_content_source: Arc<dyn PageContentSource> =
            Arc::new(HttpPageContentSource::from_env()?);

        let type_registry: Arc<dyn DocumentTypeRegistry> =
            Arc::new(StaticDocumentTypeRegistry::with_standard_types());

        // Create event bus
        let event_bus = Arc::new(BroadcastEventBus::new());
        let event_publisher: Arc<dyn EventPublisher> = event_bus.clone();

        // Create application services
        let chunk_extractor = ChunkExtractor::new()
            .map_err(|e| format!("Failed to build chunk extractor: {}", e))?;

        let document_indexer = Arc::new(DocumentIndexerService::new(
            page_content_source.clone(),
            embedding_service.clone(),
            vector_store.clone(),
            indexed_document_repository.clone(),
            document_chunk_repository.clone(),
            rag_config_repository.clone(),
            event_publisher,
            chunk_extractor,
        ));

        let retrieval_service = Arc::new(RetrievalService::new(
            embedding_service.clone(),
            vector_store.clone(),
            indexed_document_repository.clone(),
            RetrievalTuning::from_env(),
        ));

        let generation_timeout_secs: u64 = std::env::var("GENERATION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        let chat_orchestrator = Arc::new(ChatOrchestratorService::new(
            chat_session_repository.clone(),
            chat_message_repository.clone(),
            rag_config_repository.clone(),
            query_expander.clone(),
            type_registry.clone(),
            answer_generator.clone(),
            retrieval_service.clone(),
            Duration::from_secs(generation_timeout_secs),
        ));

        // Create use cases
        let index_document_use_case =
            Arc::new(IndexDocumentUseCase::new(document_indexer.clone()));

        let get_index_status_use_case = Arc::new(GetIndexStatusUseCase::new(
            indexed_document_repository.clone(),
        ));

        let ask_question_use_case = Arc::new(AskQuestionUseCase::new(chat_orchestrator.clone()));

        let create_session_use_case =
            Arc::new(CreateSessionUseCase::new(chat_session_repository.clone()));

        let list_sessions_use_case =
            Arc::new(ListSessionsUseCase::new(chat_session_repository.clone()));

        let rename_session_use_case =
            Arc::new(RenameSessionUseCase::new(chat_session_repository.clone()));

        let delete_session_use_case =
            Arc::new(DeleteSessionUseCase::new(chat_session_repository.clone()));

        let get_session_messages_use_case = Arc::new(GetSessionMessagesUseCase::new(
            chat_session_repository.clone(),
            chat_message_repository.clone(),
        ));

        let get_config_use_case = Arc::new(GetConfigUseCase::new(rag_config_repository.clone()));

        let update_config_use_case =
            Arc::new(UpdateConfigUseCase::new(rag_config_repository.clone()));

        // Create HTTP handlers
        let index_handler = Arc::new(IndexHandler::new(
            index_document_use_case.clone(),
            get_index_status_use_case.clone(),
        ));

        let chat_handler = Arc::new(ChatHandler::new(
            ask_question_use_case.clone(),
            create_session_use_case.clone(),
            list_sessions_use_case.clone(),
            rename_session_use_case.clone(),
            delete_session_use_case.clone(),
            get_session_messages_use_case.clone(),
        ));

        let config_handler = Arc::new(ConfigHandler::new(
            get_config_use_case.clone(),
            update_config_use_case.clone(),
        ));

        Ok(Self {
            indexed_document_repository,
            document_chunk_repository,
            chat_session_repository,
            chat_message_repository,
            rag_config_repository,
            embedding_service,
            vector_store,
            answer_generator,
            query_expander,
            page_content_source,
            type_registry,
            event_bus,
            document_indexer,
            retrieval_service,
            chat_orchestrator,
            index_document_use_case,
            get_index_status_use_case,
            ask_question_use_case,
            create_session_use_case,
            list_sessions_use_case,
            rename_session_use_case,
            delete_session_use_case,
            get_session_messages_use_case,
            get_config_use_case,
            update_config_use_case,
            index_handler,
            chat_handler,
            config_handler,
        })
    }
}

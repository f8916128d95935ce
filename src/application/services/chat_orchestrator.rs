use std::sync::Arc;
use std::time::Duration;

use tracing::{error, warn};
use uuid::Uuid;

use crate::application::ports::answer_generator::{ContextChunk, GenerationError};
use crate::application::ports::vector_store::SearchFilter;
use crate::application::ports::{AnswerGenerator, DocumentTypeRegistry, QueryExpander};
use crate::application::services::context_assembler::ContextAssembler;
use crate::application::services::retrieval::RetrievalService;
use crate::domain::entities::ChatMessage;
use crate::domain::repositories::{
    ChatMessageRepository, ChatSessionRepository, RagConfigRepository,
};
use crate::domain::value_objects::{DocumentTypeFilter, SourceReference};

/// Leading conjunctions stripped before embedding. Users answer their own
/// previous turn ("and what about…"), which skews similarity against
/// documents that never start sentences that way.
const LEADING_STOP_WORDS: &[&str] = &["and", "but", "also", "or", "so", "then", "plus"];

#[derive(Debug)]
pub enum AskError {
    SessionNotFound(Uuid),
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for AskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AskError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            AskError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AskError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for AskError {}

#[derive(Debug, Clone)]
pub struct AskRequest {
    pub question: String,
    pub session_id: Uuid,
    pub model_id: String,
    pub document_type: Option<DocumentTypeFilter>,
    pub quick_search: Option<String>,
}

/// Sequences one user turn: normalize, expand, retrieve, assemble, persist
/// the user message, generate under a timeout, persist the assistant
/// message. Retrieval and generation faults never escape to the caller;
/// they become the assistant's reply.
pub struct ChatOrchestratorService {
    chat_session_repository: Arc<dyn ChatSessionRepository>,
    chat_message_repository: Arc<dyn ChatMessageRepository>,
    rag_config_repository: Arc<dyn RagConfigRepository>,
    query_expander: Arc<dyn QueryExpander>,
    type_registry: Arc<dyn DocumentTypeRegistry>,
    answer_generator: Arc<dyn AnswerGenerator>,
    retrieval_service: Arc<RetrievalService>,
    generation_timeout: Duration,
}

impl ChatOrchestratorService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chat_session_repository: Arc<dyn ChatSessionRepository>,
        chat_message_repository: Arc<dyn ChatMessageRepository>,
        rag_config_repository: Arc<dyn RagConfigRepository>,
        query_expander: Arc<dyn QueryExpander>,
        type_registry: Arc<dyn DocumentTypeRegistry>,
        answer_generator: Arc<dyn AnswerGenerator>,
        retrieval_service: Arc<RetrievalService>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            chat_session_repository,
            chat_message_repository,
            rag_config_repository,
            query_expander,
            type_registry,
            answer_generator,
            retrieval_service,
            generation_timeout,
        }
    }

    pub async fn ask(&self, request: AskRequest) -> Result<ChatMessage, AskError> {
        let mut session = self
            .chat_session_repository
            .find_by_id(request.session_id)
            .await
            .map_err(|e| AskError::RepositoryError(e.to_string()))?
            .filter(|session| session.is_active())
            .ok_or(AskError::SessionNotFound(request.session_id))?;

        let normalized = normalize_question(&request.question);
        let mut queries = self.expand_queries(&normalized).await;
        let filter = self.build_filter(request.document_type.as_ref()).await?;
        fold_quick_search(&mut queries, request.quick_search.as_deref());

        let context = match self.retrieval_service.retrieve(&queries, &filter).await {
            Ok(ranked) => {
                let config = self
                    .rag_config_repository
                    .get()
                    .await
                    .map_err(|e| AskError::RepositoryError(e.to_string()))?;
                let assembler = ContextAssembler::new(
                    config.max_context_chunks() as usize,
                    self.retrieval_service.tuning().context_token_budget,
                );
                Some(assembler.assemble(&ranked))
            }
            Err(e) => {
                error!(error = %e, "retrieval failed, answering with an explanation");
                None
            }
        };

        // The user's turn is durable before the slow generation call, so
        // the question survives any generation outcome.
        let user_message = ChatMessage::user(session.id(), request.question.clone());
        self.chat_message_repository
            .save(&user_message)
            .await
            .map_err(|e| AskError::RepositoryError(e.to_string()))?;

        let assistant_message = match context {
            Some(context) => self.answer(&session.id(), &request, &context).await,
            None => ChatMessage::assistant(
                session.id(),
                "I could not search the document index just now. Your question was saved; please try again shortly.".to_string(),
                Vec::new(),
                request.model_id.clone(),
            ),
        };

        self.chat_message_repository
            .save(&assistant_message)
            .await
            .map_err(|e| AskError::RepositoryError(e.to_string()))?;

        session.touch();
        self.chat_session_repository
            .update(&session)
            .await
            .map_err(|e| AskError::RepositoryError(e.to_string()))?;

        Ok(assistant_message)
    }

    /// Normalized question first, then de-duplicated alternative phrasings.
    /// An unavailable expander degrades to the single normalized question.
    async fn expand_queries(&self, normalized: &str) -> Vec<String> {
        let mut queries = vec![normalized.to_string()];

        let n = self.retrieval_service.tuning().expansion_count;
        match self.query_expander.expand(normalized, n).await {
            Ok(alternatives) => {
                for alternative in alternatives {
                    let alternative = alternative.trim();
                    if !alternative.is_empty() && !queries.iter().any(|q| q == alternative) {
                        queries.push(alternative.to_string());
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "query expansion unavailable, using the question alone");
            }
        }

        queries
    }

    async fn build_filter(
        &self,
        document_type: Option<&DocumentTypeFilter>,
    ) -> Result<SearchFilter, AskError> {
        let mut filter = SearchFilter::default();
        if let Some(type_filter) = document_type {
            let canonical = self
                .type_registry
                .resolve(type_filter)
                .await
                .map_err(|e| AskError::ValidationError(e.to_string()))?;
            filter.document_type = Some(canonical);
        }
        Ok(filter)
    }

    async fn answer(
        &self,
        session_id: &Uuid,
        request: &AskRequest,
        context: &[ContextChunk],
    ) -> ChatMessage {
        let generation = tokio::time::timeout(
            self.generation_timeout,
            self.answer_generator
                .generate(&request.question, context, &request.model_id),
        )
        .await
        .unwrap_or(Err(GenerationError::Timeout(
            self.generation_timeout.as_secs(),
        )));

        match generation {
            Ok(generated) => {
                let sources: Vec<SourceReference> = context
                    .iter()
                    .map(|chunk| SourceReference {
                        chunk_id: chunk.chunk_id.clone(),
                        score: chunk.score,
                    })
                    .collect();
                ChatMessage::assistant(*session_id, generated.answer, sources, generated.model_used)
            }
            Err(e) => {
                warn!(error = %e, model = %request.model_id, "generation failed");
                ChatMessage::assistant(
                    *session_id,
                    user_facing_generation_error(&e),
                    Vec::new(),
                    request.model_id.clone(),
                )
            }
        }
    }
}

/// Strip leading conjunction stop-words, repeatedly, case-insensitively.
/// An emptied question falls back to the original.
pub fn normalize_question(question: &str) -> String {
    let mut rest = question.trim();
    loop {
        let Some(first) = rest.split_whitespace().next() else {
            break;
        };
        let cleaned = first.trim_end_matches([',', ';', ':']).to_lowercase();
        if LEADING_STOP_WORDS.contains(&cleaned.as_str()) {
            rest = rest[first.len()..].trim_start();
        } else {
            break;
        }
    }

    if rest.is_empty() {
        question.trim().to_string()
    } else {
        rest.to_string()
    }
}

fn fold_quick_search(queries: &mut [String], quick_search: Option<&str>) {
    let Some(quick) = quick_search.map(str::trim).filter(|q| !q.is_empty()) else {
        return;
    };
    // Folded into the query text, not pushed down as a metadata filter.
    for query in queries.iter_mut() {
        query.push(' ');
        query.push_str(quick);
    }
}

fn user_facing_generation_error(error: &GenerationError) -> String {
    match error {
        GenerationError::UnknownModel(model) => format!(
            "I could not answer because the model '{}' is not available. Please choose another model and ask again.",
            model
        ),
        GenerationError::Timeout(secs) => format!(
            "Generating the answer took longer than {} seconds and was cancelled. Please try again.",
            secs
        ),
        _ => "I ran into a problem while generating the answer. Your question was saved; please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::answer_generator::GeneratedAnswer;
    use crate::application::ports::embedding_service::{EmbeddingService, EmbeddingServiceError};
    use crate::application::ports::query_expander::QueryExpansionError;
    use crate::application::ports::type_registry::TypeRegistryError;
    use crate::application::ports::vector_store::{
        VectorHit, VectorPoint, VectorStore, VectorStoreError,
    };
    use crate::application::services::retrieval::RetrievalTuning;
    use crate::domain::entities::{ChatSession, IndexedDocument, RagConfig};
    use crate::domain::repositories::chat_message_repository::ChatMessageRepositoryError;
    use crate::domain::repositories::chat_session_repository::ChatSessionRepositoryError;
    use crate::domain::repositories::indexed_document_repository::{
        IndexedDocumentRepository, IndexedDocumentRepositoryError,
    };
    use crate::domain::repositories::rag_config_repository::RagConfigRepositoryError;
    use crate::domain::value_objects::MessageRole;

    #[test]
    fn test_normalize_strips_a_leading_conjunction() {
        assert_eq!(
            normalize_question("and what are the safety instructions?"),
            "what are the safety instructions?"
        );
    }

    #[test]
    fn test_normalize_strips_repeated_conjunctions() {
        assert_eq!(
            normalize_question("And also, but what changed?"),
            "what changed?"
        );
    }

    #[test]
    fn test_normalize_falls_back_when_emptied() {
        assert_eq!(normalize_question("and also"), "and also");
    }

    #[test]
    fn test_normalize_leaves_ordinary_questions_alone() {
        assert_eq!(
            normalize_question("What does SOP-104 require?"),
            "What does SOP-104 require?"
        );
    }

    struct OneSession {
        session: ChatSession,
        updated: Mutex<Vec<ChatSession>>,
    }

    impl OneSession {
        fn new(session: ChatSession) -> Self {
            Self {
                session,
                updated: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatSessionRepository for OneSession {
        async fn save(&self, _: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: Uuid,
        ) -> Result<Option<ChatSession>, ChatSessionRepositoryError> {
            if id == self.session.id() {
                Ok(Some(self.session.clone()))
            } else {
                Ok(None)
            }
        }

        async fn find_by_user_id(
            &self,
            _: Uuid,
        ) -> Result<Vec<ChatSession>, ChatSessionRepositoryError> {
            Ok(vec![self.session.clone()])
        }

        async fn update(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
            self.updated.lock().unwrap().push(session.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingMessages {
        saved: Mutex<Vec<ChatMessage>>,
    }

    #[async_trait]
    impl ChatMessageRepository for RecordingMessages {
        async fn save(&self, message: &ChatMessage) -> Result<(), ChatMessageRepositoryError> {
            self.saved.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn find_by_session_id(
            &self,
            _: Uuid,
        ) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError> {
            Ok(self.saved.lock().unwrap().clone())
        }
    }

    struct DefaultConfig;

    #[async_trait]
    impl RagConfigRepository for DefaultConfig {
        async fn get(&self) -> Result<RagConfig, RagConfigRepositoryError> {
            Ok(RagConfig::default())
        }

        async fn save(&self, _: &RagConfig) -> Result<(), RagConfigRepositoryError> {
            Ok(())
        }
    }

    struct EchoExpander {
        fail: bool,
    }

    #[async_trait]
    impl QueryExpander for EchoExpander {
        async fn expand(&self, question: &str, _: usize) -> Result<Vec<String>, QueryExpansionError> {
            if self.fail {
                Err(QueryExpansionError::ProviderError("llm down".to_string()))
            } else {
                Ok(vec![
                    format!("rephrased: {}", question),
                    question.to_string(),
                ])
            }
        }
    }

    struct StaticRegistry;

    #[async_trait]
    impl DocumentTypeRegistry for StaticRegistry {
        async fn resolve(&self, filter: &DocumentTypeFilter) -> Result<String, TypeRegistryError> {
            match filter {
                DocumentTypeFilter::ById(3) => Ok("SOP".to_string()),
                DocumentTypeFilter::ById(id) => Err(TypeRegistryError::UnknownTypeId(*id)),
                DocumentTypeFilter::ByName(name) => Ok(name.clone()),
            }
        }
    }

    enum GeneratorMode {
        Answer,
        UnknownModel,
        Slow,
    }

    struct ScriptedGenerator {
        mode: GeneratorMode,
        seen_context_sizes: Mutex<Vec<usize>>,
    }

    impl ScriptedGenerator {
        fn new(mode: GeneratorMode) -> Self {
            Self {
                mode,
                seen_context_sizes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AnswerGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            _question: &str,
            context: &[ContextChunk],
            model_id: &str,
        ) -> Result<GeneratedAnswer, GenerationError> {
            self.seen_context_sizes.lock().unwrap().push(context.len());
            match self.mode {
                GeneratorMode::Answer => Ok(GeneratedAnswer {
                    answer: "Calibration runs every Monday.".to_string(),
                    model_used: model_id.to_string(),
                    tokens_used: Some(64),
                    confidence: Some(0.9),
                }),
                GeneratorMode::UnknownModel => {
                    Err(GenerationError::UnknownModel(model_id.to_string()))
                }
                GeneratorMode::Slow => {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Ok(GeneratedAnswer {
                        answer: "too late".to_string(),
                        model_used: model_id.to_string(),
                        tokens_used: None,
                        confidence: None,
                    })
                }
            }
        }
    }

    struct FixedEmbedding;

    #[async_trait]
    impl EmbeddingService for FixedEmbedding {
        async fn embed(&self, _: &str) -> Result<Vec<f32>, EmbeddingServiceError> {
            Ok(vec![0.1; 3])
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vec<f32>>, EmbeddingServiceError> {
            Ok(texts.iter().map(|_| vec![0.1; 3]).collect())
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn model_name(&self) -> &str {
            "text-embedding-3-small"
        }
    }

    #[derive(Default)]
    struct RecordingVectorStore {
        hits: Vec<VectorHit>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl VectorStore for RecordingVectorStore {
        async fn create_collection(&self, _: &str, _: usize) -> Result<bool, VectorStoreError> {
            Ok(true)
        }

        async fn delete_collection(&self, _: &str) -> Result<bool, VectorStoreError> {
            Ok(true)
        }

        async fn upsert(&self, _: &str, _: Vec<VectorPoint>) -> Result<usize, VectorStoreError> {
            Ok(0)
        }

        async fn delete_by_parent(&self, _: &str, _: Uuid) -> Result<usize, VectorStoreError> {
            Ok(0)
        }

        async fn search(
            &self,
            _: &str,
            _: &[f32],
            _: &SearchFilter,
            _: usize,
            _: f32,
        ) -> Result<Vec<VectorHit>, VectorStoreError> {
            Ok(self.hits.clone())
        }

        async fn search_hybrid(
            &self,
            _: &str,
            _: &[f32],
            query_text: &str,
            _: &SearchFilter,
            _: usize,
            _: f32,
        ) -> Result<Vec<VectorHit>, VectorStoreError> {
            self.queries.lock().unwrap().push(query_text.to_string());
            Ok(self.hits.clone())
        }
    }

    struct OneDocument;

    #[async_trait]
    impl IndexedDocumentRepository for OneDocument {
        async fn save(&self, _: &IndexedDocument) -> Result<(), IndexedDocumentRepositoryError> {
            Ok(())
        }

        async fn find_by_source_document_id(
            &self,
            _: Uuid,
        ) -> Result<Option<IndexedDocument>, IndexedDocumentRepositoryError> {
            Ok(None)
        }

        async fn find_all(&self) -> Result<Vec<IndexedDocument>, IndexedDocumentRepositoryError> {
            Ok(vec![IndexedDocument::new(Uuid::new_v4())])
        }

        async fn update(&self, _: &IndexedDocument) -> Result<(), IndexedDocumentRepositoryError> {
            Ok(())
        }

        async fn delete(&self, _: Uuid) -> Result<bool, IndexedDocumentRepositoryError> {
            Ok(false)
        }
    }

    struct Fixture {
        orchestrator: ChatOrchestratorService,
        session: ChatSession,
        sessions: Arc<OneSession>,
        messages: Arc<RecordingMessages>,
        generator: Arc<ScriptedGenerator>,
        store: Arc<RecordingVectorStore>,
    }

    fn hit(chunk_id: &str, score: f32) -> VectorHit {
        VectorHit {
            chunk_id: chunk_id.to_string(),
            score,
            text: "Safety shoes are mandatory on the floor.".to_string(),
            page_number: Some(2),
            heading: Some("Safety".to_string()),
            document_type: Some("SOP".to_string()),
        }
    }

    fn fixture(mode: GeneratorMode, hits: Vec<VectorHit>, expander_fails: bool) -> Fixture {
        let session = ChatSession::new(Uuid::new_v4(), Some("Audit prep".to_string()));
        let sessions = Arc::new(OneSession::new(session.clone()));
        let messages = Arc::new(RecordingMessages::default());
        let generator = Arc::new(ScriptedGenerator::new(mode));
        let store = Arc::new(RecordingVectorStore {
            hits,
            queries: Mutex::new(Vec::new()),
        });

        let retrieval = Arc::new(RetrievalService::new(
            Arc::new(FixedEmbedding),
            store.clone(),
            Arc::new(OneDocument),
            RetrievalTuning::default(),
        ));

        let orchestrator = ChatOrchestratorService::new(
            sessions.clone(),
            messages.clone(),
            Arc::new(DefaultConfig),
            Arc::new(EchoExpander {
                fail: expander_fails,
            }),
            Arc::new(StaticRegistry),
            generator.clone(),
            retrieval,
            Duration::from_millis(100),
        );

        Fixture {
            orchestrator,
            session,
            sessions,
            messages,
            generator,
            store,
        }
    }

    fn ask_request(fixture: &Fixture, question: &str) -> AskRequest {
        AskRequest {
            question: question.to_string(),
            session_id: fixture.session.id(),
            model_id: "gpt-4o-mini".to_string(),
            document_type: None,
            quick_search: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_session_is_surfaced() {
        let f = fixture(GeneratorMode::Answer, vec![hit("c1", 0.9)], false);
        let request = AskRequest {
            session_id: Uuid::new_v4(),
            ..ask_request(&f, "where are the exits?")
        };

        let result = f.orchestrator.ask(request).await;

        assert!(matches!(result, Err(AskError::SessionNotFound(_))));
        assert!(f.messages.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_answer_carries_sources_and_both_turns_persist() {
        let f = fixture(
            GeneratorMode::Answer,
            vec![hit("doc-a-p2-c3", 0.9)],
            false,
        );

        let answer = f
            .orchestrator
            .ask(ask_request(&f, "when does calibration run?"))
            .await
            .unwrap();

        assert!(answer.role().is_assistant());
        assert_eq!(answer.source_references().len(), 1);
        assert_eq!(answer.source_references()[0].chunk_id, "doc-a-p2-c3");
        assert_eq!(answer.ai_model_used(), Some("gpt-4o-mini"));

        let saved = f.messages.saved.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].role(), MessageRole::User);
        assert_eq!(saved[0].content(), "when does calibration run?");
        assert_eq!(saved[1].role(), MessageRole::Assistant);

        // The session records the activity.
        assert_eq!(f.sessions.updated.lock().unwrap().len(), 1);
        assert!(f.sessions.updated.lock().unwrap()[0]
            .last_message_at()
            .is_some());
    }

    #[tokio::test]
    async fn test_zero_hits_still_produce_an_answer() {
        let f = fixture(GeneratorMode::Answer, Vec::new(), false);

        let answer = f
            .orchestrator
            .ask(ask_request(&f, "is there a fire drill policy?"))
            .await
            .unwrap();

        assert_eq!(answer.content(), "Calibration runs every Monday.");
        assert!(answer.source_references().is_empty());
        // The generator saw an empty context, not an error.
        assert_eq!(*f.generator.seen_context_sizes.lock().unwrap(), vec![0]);
    }

    #[tokio::test]
    async fn test_unknown_model_becomes_a_persisted_error_message() {
        let f = fixture(GeneratorMode::UnknownModel, vec![hit("c1", 0.8)], false);

        let answer = f
            .orchestrator
            .ask(ask_request(&f, "what changed in revision 4?"))
            .await
            .unwrap();

        assert!(answer.content().contains("not available"));
        assert!(answer.source_references().is_empty());

        // The user turn survives the failure.
        let saved = f.messages.saved.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].role(), MessageRole::User);
        assert_eq!(saved[0].content(), "what changed in revision 4?");
    }

    #[tokio::test]
    async fn test_generation_timeout_becomes_a_persisted_error_message() {
        let f = fixture(GeneratorMode::Slow, vec![hit("c1", 0.8)], false);

        let answer = f
            .orchestrator
            .ask(ask_request(&f, "summarize the lockout rules"))
            .await
            .unwrap();

        assert!(answer.content().contains("cancelled"));
        assert_eq!(f.messages.saved.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_queries_are_normalized_and_expanded() {
        let f = fixture(GeneratorMode::Answer, vec![hit("c1", 0.8)], false);

        f.orchestrator
            .ask(ask_request(&f, "and what are the safety instructions?"))
            .await
            .unwrap();

        let queries = f.store.queries.lock().unwrap();
        // Normalized question first; expander echoing the question back
        // does not duplicate it.
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], "what are the safety instructions?");
        assert_eq!(queries[1], "rephrased: what are the safety instructions?");
    }

    #[tokio::test]
    async fn test_expander_failure_degrades_to_single_query() {
        let f = fixture(GeneratorMode::Answer, vec![hit("c1", 0.8)], true);

        f.orchestrator
            .ask(ask_request(&f, "what are the ppe rules?"))
            .await
            .unwrap();

        assert_eq!(f.store.queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_quick_search_is_folded_into_query_text() {
        let f = fixture(GeneratorMode::Answer, vec![hit("c1", 0.8)], true);
        let request = AskRequest {
            quick_search: Some("torque wrench".to_string()),
            ..ask_request(&f, "what is the calibration interval?")
        };

        f.orchestrator.ask(request).await.unwrap();

        let queries = f.store.queries.lock().unwrap();
        assert!(queries[0].ends_with("torque wrench"));
    }

    #[tokio::test]
    async fn test_unknown_type_id_is_rejected_at_the_boundary() {
        let f = fixture(GeneratorMode::Answer, vec![hit("c1", 0.8)], false);
        let request = AskRequest {
            document_type: Some(DocumentTypeFilter::ById(99)),
            ..ask_request(&f, "what are the audit steps?")
        };

        let result = f.orchestrator.ask(request).await;

        assert!(matches!(result, Err(AskError::ValidationError(_))));
        assert!(f.messages.saved.lock().unwrap().is_empty());
    }
}

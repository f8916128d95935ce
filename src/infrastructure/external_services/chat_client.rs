use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::answer_generator::{
    AnswerGenerator, ContextChunk, GeneratedAnswer, GenerationError,
};
use crate::application::ports::query_expander::{QueryExpander, QueryExpansionError};
use crate::domain::entities::rag_config::LEGAL_AI_MODELS;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatTurn {
    role: String,
    content: String,
}

impl ChatTurn {
    fn system(content: String) -> Self {
        Self {
            role: "system".to_string(),
            content,
        }
    }

    fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: i32,
}

#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    pub service_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ChatClientConfig {
    fn default() -> Self {
        let service_url = env::var("CHAT_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8082/v1/chat/completions".to_string());

        // Generation can legitimately run for minutes; the orchestrator
        // wraps calls in its own deadline.
        let timeout_secs = env::var("CHAT_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(600);

        Self {
            service_url,
            api_key: env::var("CHAT_API_KEY").ok(),
            timeout_secs,
        }
    }
}

#[derive(Debug)]
pub enum ChatClientError {
    RequestError(String),
    ApiError { status: u16, message: String },
    ParseError(String),
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    config: ChatClientConfig,
}

impl ChatClient {
    pub fn new(config: ChatClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(ChatClientConfig::default())
    }

    async fn complete(
        &self,
        model: &str,
        messages: &[ChatTurn],
        temperature: f32,
    ) -> Result<ChatCompletionResponse, ChatClientError> {
        let request = ChatCompletionRequest {
            model,
            messages,
            temperature,
        };

        let mut builder = self.client.post(&self.config.service_url).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ChatClientError::RequestError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatClientError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ChatClientError::ParseError(e.to_string()))
    }
}

fn answer_prompt(context: &[ContextChunk]) -> String {
    if context.is_empty() {
        return "You answer questions about controlled quality-management documents. \
                No relevant document excerpts were found for this question. Say that \
                clearly and do not invent document content."
            .to_string();
    }

    let mut prompt = String::from(
        "You answer questions about controlled quality-management documents. \
         Answer using only the excerpts below and cite pages where helpful. \
         If the excerpts do not contain the answer, say so.\n\nExcerpts:\n",
    );

    for chunk in context {
        match (&chunk.heading, chunk.page_number) {
            (Some(heading), Some(page)) => {
                prompt.push_str(&format!("[page {}, {}] {}\n\n", page, heading, chunk.text));
            }
            (None, Some(page)) => {
                prompt.push_str(&format!("[page {}] {}\n\n", page, chunk.text));
            }
            _ => {
                prompt.push_str(&format!("{}\n\n", chunk.text));
            }
        }
    }

    prompt
}

/// AnswerGenerator adapter for an OpenAI-compatible chat completions API.
pub struct OpenAiAnswerGenerator {
    client: ChatClient,
}

impl OpenAiAnswerGenerator {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnswerGenerator for OpenAiAnswerGenerator {
    async fn generate(
        &self,
        question: &str,
        context: &[ContextChunk],
        model_id: &str,
    ) -> Result<GeneratedAnswer, GenerationError> {
        if !LEGAL_AI_MODELS.contains(&model_id) {
            return Err(GenerationError::UnknownModel(model_id.to_string()));
        }

        let messages = vec![
            ChatTurn::system(answer_prompt(context)),
            ChatTurn::user(question.to_string()),
        ];

        let response = self
            .client
            .complete(model_id, &messages, 0.2)
            .await
            .map_err(|e| match e {
                ChatClientError::RequestError(msg) => GenerationError::NetworkError(msg),
                ChatClientError::ApiError { status, message } => {
                    GenerationError::UpstreamError(format!("{}: {}", status, message))
                }
                ChatClientError::ParseError(msg) => GenerationError::InvalidResponse(msg),
            })?;

        let answer = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::InvalidResponse("no choices returned".to_string()))?;

        Ok(GeneratedAnswer {
            answer,
            model_used: response.model.unwrap_or_else(|| model_id.to_string()),
            tokens_used: response.usage.map(|usage| usage.total_tokens),
            confidence: None,
        })
    }
}

fn parse_rephrasings(raw: &str, n: usize) -> Vec<String> {
    raw.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
                .trim_start_matches(['-', '*'])
                .trim()
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .take(n)
        .collect()
}

/// QueryExpander adapter: asks the chat model for alternative phrasings,
/// one per line.
pub struct LlmQueryExpander {
    client: ChatClient,
    model: String,
}

impl LlmQueryExpander {
    pub fn new(client: ChatClient, model: String) -> Self {
        Self { client, model }
    }

    pub fn from_env(client: ChatClient) -> Self {
        let model =
            env::var("QUERY_EXPANSION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        Self::new(client, model)
    }
}

#[async_trait]
impl QueryExpander for LlmQueryExpander {
    async fn expand(&self, question: &str, n: usize) -> Result<Vec<String>, QueryExpansionError> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let instruction = format!(
            "Rephrase the question below in {} different ways that keep its meaning. \
             Return one rephrasing per line with no numbering or commentary.\n\nQuestion: {}",
            n, question
        );
        let messages = vec![ChatTurn::user(instruction)];

        let response = self
            .client
            .complete(&self.model, &messages, 0.7)
            .await
            .map_err(|e| match e {
                ChatClientError::RequestError(msg) => QueryExpansionError::ProviderError(msg),
                ChatClientError::ApiError { status, message } => {
                    QueryExpansionError::ProviderError(format!("{}: {}", status, message))
                }
                ChatClientError::ParseError(msg) => QueryExpansionError::InvalidResponse(msg),
            })?;

        let raw = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                QueryExpansionError::InvalidResponse("no choices returned".to_string())
            })?;

        Ok(parse_rephrasings(&raw, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, page: Option<i32>, heading: Option<&str>) -> ContextChunk {
        ContextChunk {
            chunk_id: "doc-a-p1-c0".to_string(),
            text: text.to_string(),
            page_number: page,
            heading: heading.map(str::to_string),
            score: 0.8,
        }
    }

    #[test]
    fn test_answer_prompt_cites_page_and_heading() {
        let context = vec![chunk(
            "Wear safety shoes on the floor.",
            Some(3),
            Some("Safety"),
        )];

        let prompt = answer_prompt(&context);

        assert!(prompt.contains("[page 3, Safety] Wear safety shoes on the floor."));
    }

    #[test]
    fn test_answer_prompt_without_context_says_nothing_found() {
        let prompt = answer_prompt(&[]);

        assert!(prompt.contains("No relevant document excerpts"));
    }

    #[test]
    fn test_parse_rephrasings_strips_numbering() {
        let raw = "1. What does the SOP require?\n2) Which rules apply?\n- How is it governed?\n\n";

        let parsed = parse_rephrasings(raw, 3);

        assert_eq!(
            parsed,
            vec![
                "What does the SOP require?",
                "Which rules apply?",
                "How is it governed?"
            ]
        );
    }

    #[test]
    fn test_parse_rephrasings_caps_at_n() {
        let raw = "a\nb\nc\nd";

        assert_eq!(parse_rephrasings(raw, 2).len(), 2);
    }
}

// src/llm.rs
// Language-model provider abstraction - chat completions + embeddings

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::{IngestError, IngestResult};

/// Chat model used for structured metadata extraction
pub const CHAT_MODEL: &str = "gpt-4o-mini";

/// Embedding model for chunk vectors
pub const EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Dimensionality of text-embedding-3-small vectors
pub const EMBEDDING_DIM: usize = 1536;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Language-model provider trait - implement this to swap model backends
/// (and to inject test doubles into the pipeline).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Single-turn chat completion; returns the raw assistant text.
    async fn chat_completion(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> IngestResult<String>;

    /// Embed one text into a fixed-dimension vector.
    async fn embed(&self, text: &str) -> IngestResult<Vec<f32>>;
}

/// OpenAI-backed provider
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
    encoding_format: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> IngestResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn chat_completion(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> IngestResult<String> {
        debug!(
            model = CHAT_MODEL,
            prompt_len = user.len(),
            temperature,
            "Requesting chat completion"
        );

        let request = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
        };

        let response: ChatResponse = self.post_json("/chat/completions", &request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(IngestError::EmptyModelResponse("choices"))?;

        Ok(choice.message.content.trim().to_string())
    }

    async fn embed(&self, text: &str) -> IngestResult<Vec<f32>> {
        debug!(model = EMBEDDING_MODEL, text_len = text.len(), "Requesting embedding");

        let request = EmbeddingRequest {
            model: EMBEDDING_MODEL,
            input: text,
            encoding_format: "float",
        };

        let response: EmbeddingResponse = self.post_json("/embeddings", &request).await?;
        let first = response
            .data
            .into_iter()
            .next()
            .ok_or(IngestError::EmptyModelResponse("embedding data"))?;

        Ok(first.embedding)
    }
}

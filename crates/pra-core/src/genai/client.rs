//! Generation capability client
//!
//! The capability is consumed through a trait so pipelines cannot observe
//! which backend (or canned test double) is wired in. The HTTP client
//! targets an OpenAI-style chat-completions endpoint.

use crate::config::GenerationConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors from the generation capability
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// Capability not configured
    #[error("generation capability not configured")]
    NotConfigured,

    /// Transport-level failure
    #[error("http error: {0}")]
    Http(String),

    /// Response could not be decoded
    #[error("response error: {0}")]
    Response(String),
}

/// One completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt
    pub system: String,
    /// User prompt
    pub user: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Response length cap
    pub max_tokens: u32,
}

/// Generation capability interface
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Complete a prompt pair into text
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenAiError>;
}

/// OpenAI-style chat-completions client
#[derive(Debug)]
pub struct HttpGenerativeClient {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl HttpGenerativeClient {
    /// Create a client from generation settings
    ///
    /// # Errors
    /// `NotConfigured` when the API key is empty, `Http` when the
    /// underlying client cannot be constructed.
    pub fn new(config: GenerationConfig) -> Result<Self, GenAiError> {
        if !config.is_configured() {
            return Err(GenAiError::NotConfigured);
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenAiError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ChatErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatErrorDetail {
    message: String,
}

#[async_trait]
impl GenerativeClient for HttpGenerativeClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenAiError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenAiError::Http(e.to_string()))?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::Response(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(GenAiError::Response(error.message));
        }

        parsed
            .choices
            .and_then(|mut c| c.pop())
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| GenAiError::Response("empty choices".to_string()))
    }
}

/// Strip a fenced code block wrapper, if present
///
/// Generated JSON frequently arrives wrapped in ```json fences; parsing
/// happens on the inner payload.
#[must_use]
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    for fence in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(fence) {
            if let Some(inner) = rest.split("```").next() {
                return inner.trim();
            }
        }
    }
    trimmed
}

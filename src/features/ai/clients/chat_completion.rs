use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChatCompletionError {
    /// Non-2xx reply; carries the provider's own message when it sent one
    #[error("Provider error: {}", .0.as_deref().unwrap_or("no message"))]
    Provider(Option<String>),

    #[error("Request failed: {0}")]
    Transport(String),

    /// 2xx reply without a usable message body
    #[error("Malformed completion: {0}")]
    Malformed(String),
}

/// Hosted chat-completion model
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send one request and return the first choice's message content, trimmed
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<String, ChatCompletionError>;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Provider error envelope: `{"error": {"message": "..."}}`
#[derive(Debug, Deserialize)]
struct ProviderErrorResponse {
    error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: Option<String>,
}

/// OpenAI-compatible chat completions client
pub struct OpenAiClient {
    api_url: String,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<String, ChatCompletionError> {
        tracing::debug!(
            "Chat completion request: model={}, max_tokens={}",
            request.model,
            request.max_tokens
        );

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat completion request failed: {}", e);
                ChatCompletionError::Transport(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty());

            tracing::warn!("Chat completion returned {}: {:?}", status, message);
            return Err(ChatCompletionError::Provider(message));
        }

        let completion = response.json::<CompletionResponse>().await.map_err(|e| {
            tracing::error!("Failed to parse chat completion: {}", e);
            ChatCompletionError::Malformed(e.to_string())
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| ChatCompletionError::Malformed("no choices in reply".to_string()))
    }
}

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::core::config::AiConfig;
use crate::core::error::AppError;
use crate::features::ai::clients::{ChatCompletion, ChatCompletionError, ChatMessage, ChatRequest};
use crate::features::ai::models::{
    Classification, ClassificationSource, Sentiment, DEFAULT_SENTIMENT_INTENSITY,
    NEUTRAL_SENTIMENT, SENTIMENT_LABELS,
};
use crate::features::reports::models::{ReportCategory, ReportUrgency};
use crate::shared::constants::{
    AI_CLASSIFICATION_CONFIDENCE, MAX_SUGGESTION_INPUT_LEN, MAX_SUGGESTION_LEN,
    MIN_CLASSIFICATION_TEXT_LEN,
};
use crate::shared::llm::{parse_json, parse_with_fallback, LlmResponse};
use crate::shared::prompts;

const CLASSIFY_TEMPERATURE: f32 = 0.3;
const CLASSIFY_MAX_TOKENS: u32 = 100;
const KEYWORDS_TEMPERATURE: f32 = 0.3;
const KEYWORDS_MAX_TOKENS: u32 = 50;
const MAX_KEYWORDS: usize = 5;
const SENTIMENT_TEMPERATURE: f32 = 0.3;
const SENTIMENT_MAX_TOKENS: u32 = 50;
const SUGGESTION_TEMPERATURE: f32 = 0.5;
const SUGGESTION_MAX_TOKENS: u32 = 30;

const CLASSIFICATION_FAILED_MESSAGE: &str = "AI classification failed";

#[derive(Debug, Error, PartialEq)]
pub enum ClassificationError {
    #[error("OpenAI API key not configured")]
    Configuration,

    #[error("Description too short for classification")]
    Input,

    #[error("Invalid AI response format")]
    ResponseFormat,

    /// Provider rejected the call or could not be reached
    #[error("{0}")]
    Provider(String),
}

impl From<ClassificationError> for AppError {
    fn from(err: ClassificationError) -> Self {
        match err {
            ClassificationError::Configuration => AppError::ServiceUnavailable(err.to_string()),
            ClassificationError::Input => AppError::BadRequest(err.to_string()),
            ClassificationError::ResponseFormat | ClassificationError::Provider(_) => {
                AppError::ExternalServiceError(err.to_string())
            }
        }
    }
}

impl From<ChatCompletionError> for ClassificationError {
    fn from(err: ChatCompletionError) -> Self {
        match err {
            ChatCompletionError::Provider(message) => ClassificationError::Provider(
                message.unwrap_or_else(|| CLASSIFICATION_FAILED_MESSAGE.to_string()),
            ),
            ChatCompletionError::Transport(message) => ClassificationError::Provider(message),
            ChatCompletionError::Malformed(_) => ClassificationError::ResponseFormat,
        }
    }
}

impl From<prompts::TemplateError> for ClassificationError {
    fn from(err: prompts::TemplateError) -> Self {
        tracing::error!("Prompt rendering failed: {}", err);
        ClassificationError::Provider(CLASSIFICATION_FAILED_MESSAGE.to_string())
    }
}

/// Raw classification reply; values are coerced afterwards
#[derive(Debug, Deserialize)]
struct ClassificationReply {
    #[serde(default)]
    category: Value,
    #[serde(default)]
    urgency: Value,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
struct SentimentReply {
    #[serde(default)]
    sentiment: Value,
    #[serde(default)]
    intensity: Value,

    #[serde(default = "default_true")]
    is_llm_success: bool,
    #[serde(skip)]
    llm_error_message: Option<String>,
}

impl LlmResponse for SentimentReply {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.is_llm_success = false;
        self.llm_error_message = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.is_llm_success
    }
}

impl SentimentReply {
    fn into_sentiment(self) -> Sentiment {
        if !self.is_success() {
            tracing::debug!(
                "Sentiment reply unusable: {}",
                self.llm_error_message.unwrap_or_default()
            );
            return Sentiment::default();
        }

        let sentiment = self
            .sentiment
            .as_str()
            .filter(|label| SENTIMENT_LABELS.contains(label))
            .unwrap_or(NEUTRAL_SENTIMENT)
            .to_string();
        let intensity = self
            .intensity
            .as_f64()
            .filter(|i| i.is_finite())
            .map_or(DEFAULT_SENTIMENT_INTENSITY, |i| i.clamp(0.0, 1.0));

        Sentiment {
            sentiment,
            intensity,
        }
    }
}

/// Turns report text into a suggested category and urgency, plus a few
/// auxiliary readings (keywords, sentiment, an improvement hint).
///
/// Only `classify` reports failures; the auxiliary calls fall back to
/// neutral values.
pub struct ClassificationService {
    backend: Arc<dyn ChatCompletion>,
    api_key: Option<String>,
    model: String,
}

impl ClassificationService {
    pub fn new(config: &AiConfig, backend: Arc<dyn ChatCompletion>) -> Self {
        Self {
            backend,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether a usable credential is configured
    pub fn is_available(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| k.starts_with("sk-"))
    }

    fn request(
        &self,
        system: String,
        user: String,
        temperature: f32,
        max_tokens: u32,
    ) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature,
            max_tokens,
        }
    }

    pub async fn classify(&self, text: &str) -> Result<Classification, ClassificationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ClassificationError::Configuration)?;

        if text.trim().chars().count() < MIN_CLASSIFICATION_TEXT_LEN {
            return Err(ClassificationError::Input);
        }

        let request = self.request(
            prompts::render_classify_system_prompt()?,
            prompts::render_classify_user_prompt(text)?,
            CLASSIFY_TEMPERATURE,
            CLASSIFY_MAX_TOKENS,
        );

        let reply = self.backend.complete(api_key, &request).await?;

        let parsed = parse_json::<ClassificationReply>(&reply).map_err(|e| {
            tracing::warn!("Failed to parse AI response: {}", e);
            ClassificationError::ResponseFormat
        })?;

        let category = parsed
            .category
            .as_str()
            .map_or(ReportCategory::Other, ReportCategory::coerce);
        let urgency = parsed
            .urgency
            .as_str()
            .map_or(ReportUrgency::Medium, ReportUrgency::coerce);

        tracing::debug!("Classified report as {} / {}", category, urgency);

        Ok(Classification {
            category,
            urgency,
            confidence: AI_CLASSIFICATION_CONFIDENCE,
            source: ClassificationSource::Ai,
        })
    }

    /// Up to five key terms; empty on any failure
    pub async fn extract_keywords(&self, text: &str) -> Vec<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Vec::new();
        };

        let reply = match prompts::render_keywords_system_prompt() {
            Ok(system) => {
                let request = self.request(
                    system,
                    text.to_string(),
                    KEYWORDS_TEMPERATURE,
                    KEYWORDS_MAX_TOKENS,
                );
                self.backend.complete(api_key, &request).await
            }
            Err(e) => {
                tracing::error!("Keyword extraction error: {}", e);
                return Vec::new();
            }
        };

        match reply.map_err(|e| e.to_string()).and_then(|r| parse_json::<Vec<Value>>(&r)) {
            Ok(items) => items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .take(MAX_KEYWORDS)
                .collect(),
            Err(e) => {
                tracing::warn!("Keyword extraction error: {}", e);
                Vec::new()
            }
        }
    }

    /// Sentiment label and intensity; neutral/0.5 on any failure
    pub async fn analyze_sentiment(&self, text: &str) -> Sentiment {
        let Some(api_key) = self.api_key.as_deref() else {
            return Sentiment::default();
        };

        let system = match prompts::render_sentiment_system_prompt() {
            Ok(system) => system,
            Err(e) => {
                tracing::error!("Sentiment analysis error: {}", e);
                return Sentiment::default();
            }
        };
        let request = self.request(
            system,
            text.to_string(),
            SENTIMENT_TEMPERATURE,
            SENTIMENT_MAX_TOKENS,
        );

        match self.backend.complete(api_key, &request).await {
            Ok(reply) => parse_with_fallback::<SentimentReply>(&reply).into_sentiment(),
            Err(e) => {
                tracing::warn!("Sentiment analysis error: {}", e);
                Sentiment::default()
            }
        }
    }

    /// One short improvement hint for vague reports, if the model has one
    pub async fn get_suggestions(&self, text: &str) -> Option<String> {
        let api_key = self.api_key.as_deref()?;
        if text.chars().count() > MAX_SUGGESTION_INPUT_LEN {
            return None;
        }

        let system = prompts::render_suggestion_system_prompt()
            .map_err(|e| tracing::error!("Suggestions error: {}", e))
            .ok()?;
        let request = self.request(
            system,
            text.to_string(),
            SUGGESTION_TEMPERATURE,
            SUGGESTION_MAX_TOKENS,
        );

        let suggestion = self
            .backend
            .complete(api_key, &request)
            .await
            .map_err(|e| tracing::warn!("Suggestions error: {}", e))
            .ok()?;

        let suggestion = suggestion.trim();
        let length = suggestion.chars().count();
        (length > 0 && length < MAX_SUGGESTION_LEN).then(|| suggestion.to_string())
    }
}

//! OpenRouter completion adapter.
//!
//! OpenRouter exposes an OpenAI-compatible chat-completions API:
//! https://openrouter.ai/docs

use sense_core::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};

use crate::client::{AnswerClient, ChatMessage, Completion, CompletionUsage};

/// Default OpenRouter API base URL.
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Application identifier sent in the `X-Title` header.
const APP_TITLE: &str = "Search Sense";

// Fixed generation parameters: deterministic-leaning sampling and a bounded
// completion length. These are adapter configuration, not pipeline inputs.
const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 4000;
const TOP_P: f32 = 0.9;
const FREQUENCY_PENALTY: f32 = 0.1;
const PRESENCE_PENALTY: f32 = 0.1;

/// OpenRouter chat-completions request format.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

/// OpenRouter chat-completions response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Error body returned by OpenRouter on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// OpenRouter completion client.
pub struct OpenRouterClient {
    api_key: String,
    base_url: String,
    model: String,
    app_url: String,
    client: reqwest::Client,
}

impl OpenRouterClient {
    /// Create a new client.
    ///
    /// Fails fast with [`PipelineError::MisconfiguredCredential`] when the
    /// key is missing or blank, so a misconfigured process cannot get as far
    /// as a runtime call failure.
    pub fn new(api_key: impl Into<String>) -> PipelineResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PipelineError::MisconfiguredCredential(
                "OpenRouter API key is empty; set SENSE_API_KEY or OPENROUTER_API_KEY"
                    .to_string(),
            ));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: sense_core::config::DEFAULT_MODEL.to_string(),
            app_url: sense_core::config::DEFAULT_APP_URL.to_string(),
            client: reqwest::Client::new(),
        })
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model identifier sent with every request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the application URL sent as the `HTTP-Referer` header.
    pub fn with_app_url(mut self, app_url: impl Into<String>) -> Self {
        self.app_url = app_url.into();
        self
    }
}

#[async_trait::async_trait]
impl AnswerClient for OpenRouterClient {
    fn provider_name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> PipelineResult<Completion> {
        tracing::info!("Sending completion request to OpenRouter");
        tracing::debug!(model = %self.model, message_count = messages.len());

        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.app_url)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<ErrorResponse>(&text).ok())
                .and_then(|body| body.error)
                .map(|detail| detail.message)
                .unwrap_or_else(|| "unknown error occurred".to_string());

            return Err(PipelineError::CompletionService {
                status: status.as_u16(),
                message,
            });
        }

        let payload: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| PipelineError::CompletionService {
                    status: status.as_u16(),
                    message: format!("failed to decode completion response: {e}"),
                })?;

        let Some(choice) = payload.choices.into_iter().next() else {
            tracing::warn!("Completion response contained no choices");
            return Err(PipelineError::EmptyCompletion);
        };

        tracing::info!("Received completion from OpenRouter");

        Ok(Completion {
            content: choice.message.content,
            usage: payload.usage,
        })
    }
}

/// Map a reqwest failure onto the transport variant, flagging timeouts.
fn transport_error(err: reqwest::Error) -> PipelineError {
    PipelineError::Transport {
        timeout: err.is_timeout(),
        message: format!("completion request failed: {err}"),
    }
}

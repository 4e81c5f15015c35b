//! Chat-completion abstraction and message types.

use sense_core::PipelineResult;
use serde::{Deserialize, Serialize};

/// Role of a chat message.
///
/// The pipeline is single-turn: it only ever sends a system instruction
/// followed by one user message, so assistant-role messages do not exist
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One message in a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Synthesized text returned by a completion backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Token usage statistics, when the backend reports them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionUsage>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionUsage {
    #[serde(default)]
    pub prompt_tokens: u32,

    #[serde(default)]
    pub completion_tokens: u32,

    #[serde(default)]
    pub total_tokens: u32,
}

/// Trait for chat-completion backends.
///
/// Implementors encapsulate transport, serialization, and vendor-specific
/// API details, so the pipeline stays decoupled from any particular
/// provider.
#[async_trait::async_trait]
pub trait AnswerClient: Send + Sync {
    /// Get the provider name (e.g., "openrouter").
    fn provider_name(&self) -> &str;

    /// Send the given messages, in order, in a single non-streaming call and
    /// return the synthesized text.
    ///
    /// Generation parameters (sampling, length bound) are adapter
    /// configuration, not part of this contract.
    async fn complete(&self, messages: &[ChatMessage]) -> PipelineResult<Completion>;
}

//! Completion backend integration for Search Sense.
//!
//! Provides the chat-message model, the [`AnswerClient`] trait that
//! completion backends implement, and the OpenRouter adapter.
//!
//! The pipeline is single-turn and non-streaming: one request with a system
//! message and a user message, one synthesized answer back.

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{AnswerClient, ChatMessage, Completion, CompletionUsage, Role};
pub use factory::create_answer_client;
pub use providers::OpenRouterClient;

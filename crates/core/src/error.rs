//! Error types for the Search Sense pipeline.
//!
//! Every failure a `run` can produce is one of the variants below. Callers
//! branch on the variant, never on message text. We never panic on a failure
//! path; errors must be represented and propagated.

use thiserror::Error;

/// Unified error type for the answer pipeline and its adapters.
///
/// The first six variants are the terminal outcomes of a pipeline run; the
/// remaining ones cover configuration and I/O around it.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The query was empty after trimming. Rejected before any network call.
    #[error("the question is empty")]
    EmptyQuery,

    /// Search succeeded but matched no documents. A final, user-facing
    /// outcome, distinct from a transport error; never retried.
    #[error("no search results found, try a different question")]
    NoResults,

    /// The search backend returned an error status or an unreadable body.
    #[error("search service error: {message}")]
    SearchService { message: String },

    /// The completion backend answered with success but generated no choice.
    /// Indicates content filtering or backend misbehavior, not a transient
    /// fault; never retried.
    #[error("the model did not generate a response")]
    EmptyCompletion,

    /// The completion backend returned a non-success status.
    #[error("AI service error ({status}): {message}")]
    CompletionService { status: u16, message: String },

    /// Network-level failure or an elapsed deadline on either outbound call.
    /// `timeout` distinguishes a deadline from a connection failure.
    #[error("transport error: {message}")]
    Transport { timeout: bool, message: String },

    /// No credential was configured for the completion backend. Raised at
    /// adapter construction, before any call is attempted.
    #[error("credential not configured: {0}")]
    MisconfiguredCredential(String),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Build a `Transport` variant for an elapsed per-call deadline.
    pub fn timeout(stage: &str) -> Self {
        PipelineError::Transport {
            timeout: true,
            message: format!("{stage} call exceeded the configured deadline"),
        }
    }

    /// Whether this error was caused by an elapsed deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PipelineError::Transport { timeout: true, .. })
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for PipelineError {
    fn from(err: serde_yaml::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with PipelineError.
pub type PipelineResult<T> = Result<T, PipelineError>;

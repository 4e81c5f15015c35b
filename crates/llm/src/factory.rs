//! Completion client factory.
//!
//! Builds the process-wide completion client from application configuration.
//! The handle is constructed once at startup and shared by reference into
//! every pipeline invocation; there is no hidden global state.

use std::sync::Arc;

use sense_core::{AppConfig, PipelineError, PipelineResult};

use crate::client::AnswerClient;
use crate::providers::OpenRouterClient;

/// Create the completion client for the configured backend.
///
/// Resolves the credential (direct key first, then the config file's
/// `apiKeyEnv` indirection) and applies endpoint, model, and referer
/// overrides. Fails before any call is attempted when no credential is
/// configured.
pub fn create_answer_client(config: &AppConfig) -> PipelineResult<Arc<dyn AnswerClient>> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        PipelineError::MisconfiguredCredential(
            "no completion API key configured; set SENSE_API_KEY or OPENROUTER_API_KEY"
                .to_string(),
        )
    })?;

    let mut client = OpenRouterClient::new(api_key)?
        .with_model(&config.model)
        .with_app_url(&config.app_url);

    if let Some(ref endpoint) = config.base_url {
        client = client.with_base_url(endpoint);
    }

    Ok(Arc::new(client))
}

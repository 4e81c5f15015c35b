//! SearXNG search adapter.
//!
//! Talks to any SearXNG-compatible metasearch instance via its JSON API:
//! `GET {base}/search?q={query}&format=json`.

use sense_core::{PipelineError, PipelineResult};
use serde::Deserialize;

use crate::client::SearchClient;
use crate::result::SearchResult;

/// One result entry in the SearXNG JSON response.
#[derive(Debug, Deserialize)]
struct SearxResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// SearXNG JSON response format.
#[derive(Debug, Deserialize)]
struct SearxResponse {
    #[serde(default)]
    results: Vec<SearxResult>,
}

/// Search client for SearXNG-compatible backends.
pub struct SearxClient {
    /// Base URL of the search instance
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl SearxClient {
    /// Create a new client against the default local instance.
    pub fn new() -> Self {
        Self::with_base_url(sense_core::config::DEFAULT_SEARCH_URL)
    }

    /// Create a new client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for SearxClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SearchClient for SearxClient {
    fn provider_name(&self) -> &str {
        "searx"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> PipelineResult<Vec<SearchResult>> {
        tracing::info!("Sending search request");
        tracing::debug!(query, max_results);

        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(PipelineError::SearchService {
                message: format!("search backend returned {status}: {body}"),
            });
        }

        let payload: SearxResponse =
            response
                .json()
                .await
                .map_err(|e| PipelineError::SearchService {
                    message: format!("failed to decode search response: {e}"),
                })?;

        // Backend order defines citation numbering downstream; keep it.
        let results: Vec<SearchResult> = payload
            .results
            .iter()
            .filter_map(|candidate| {
                let parsed =
                    SearchResult::parse(&candidate.title, &candidate.url, &candidate.content);
                if parsed.is_none() {
                    tracing::debug!(url = %candidate.url, "dropping malformed search result");
                }
                parsed
            })
            .take(max_results)
            .collect();

        tracing::info!("Search returned {} results", results.len());

        Ok(results)
    }
}

/// Map a reqwest failure onto the transport variant, flagging timeouts.
fn transport_error(err: reqwest::Error) -> PipelineError {
    PipelineError::Transport {
        timeout: err.is_timeout(),
        message: format!("search request failed: {err}"),
    }
}

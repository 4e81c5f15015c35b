//! Search backend abstraction.

use sense_core::PipelineResult;

use crate::result::SearchResult;

/// Trait for web search backends.
///
/// Implementors encapsulate transport and backend-specific wire formats; the
/// pipeline stays decoupled from any particular search service.
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    /// Get the backend name (e.g., "searx").
    fn provider_name(&self) -> &str;

    /// Search the web for `query`.
    ///
    /// Returns at most `max_results` documents, ranked best-first in backend
    /// order. Fewer results, including none, is a valid success; the caller
    /// decides what an empty set means. Transport and service failures are
    /// errors, never an empty list.
    async fn search(&self, query: &str, max_results: usize)
        -> PipelineResult<Vec<SearchResult>>;
}

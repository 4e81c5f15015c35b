//! Pipeline output type.

use sense_search::SearchResult;
use serde::{Deserialize, Serialize};

/// A synthesized answer together with the sources it cites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Markdown prose containing bracketed citation markers `[n]`.
    ///
    /// Markers come back from the completion backend untouched: the pipeline
    /// never rewrites or renumbers them. `n` refers to the 1-based position
    /// of a source below.
    pub text: String,

    /// The ordered result list the prompt was built from, so a presentation
    /// layer can resolve `[n]` to `sources[n - 1]` without re-searching.
    pub sources: Vec<SearchResult>,
}

//! The retrieved-document value type.

use serde::{Deserialize, Serialize};
use url::Url;

/// One retrieved web document.
///
/// Instances are only created through [`SearchResult::parse`], which enforces
/// the construction invariants: the title is non-empty after trimming, the
/// URL is a syntactically valid absolute URL, and the domain is derived from
/// the URL's host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document title, trimmed and non-empty
    pub title: String,

    /// Absolute URL, used for citation linking
    pub url: String,

    /// Host of the URL, used for display
    pub domain: String,

    /// Short excerpt from the document; may be empty. Truncation is the
    /// search backend's concern, never ours.
    pub snippet: String,
}

impl SearchResult {
    /// Validate a raw candidate from a search backend.
    ///
    /// Returns `None` when the candidate violates an invariant, in which
    /// case the adapter drops it instead of surfacing a malformed source.
    pub fn parse(title: &str, url: &str, snippet: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let parsed = Url::parse(url).ok()?;
        let domain = parsed.host_str()?.to_string();

        Some(Self {
            title: title.to_string(),
            url: url.to_string(),
            domain,
            snippet: snippet.to_string(),
        })
    }
}

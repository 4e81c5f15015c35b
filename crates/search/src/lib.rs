//! Web search integration for Search Sense.
//!
//! This crate defines the retrieval half of the answer pipeline: the
//! [`SearchResult`] value type, the [`SearchClient`] trait that search
//! backends implement, and an adapter for SearXNG-compatible JSON APIs.
//!
//! Result order is significant everywhere in this crate: the position of a
//! result defines its citation number in the rendered prompt, so adapters
//! must preserve the backend's ranking.

pub mod client;
pub mod providers;
pub mod result;

// Re-export main types
pub use client::SearchClient;
pub use providers::SearxClient;
pub use result::SearchResult;

//! Prompt construction for Search Sense.
//!
//! One job: turn a query and an ordered result list into the two chat
//! messages sent to the completion backend.

pub mod builder;

pub use builder::{build_messages, SYSTEM_PROMPT};

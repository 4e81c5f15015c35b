//! Command handlers for the Search Sense CLI.

mod ask;

pub use ask::AskCommand;

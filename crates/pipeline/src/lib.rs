//! Retrieval-augmented answer pipeline for Search Sense.
//!
//! The orchestration core: one query in, a bounded web search, one
//! completion call over a prompt that embeds the numbered results, and a
//! cited [`Answer`] (or a typed [`sense_core::PipelineError`]) out.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use sense_pipeline::AnswerPipeline;
//! use sense_search::SearxClient;
//! use sense_llm::OpenRouterClient;
//!
//! # async fn example() -> sense_core::PipelineResult<()> {
//! let search = Arc::new(SearxClient::new());
//! let answerer = Arc::new(OpenRouterClient::new("sk-...")?);
//! let pipeline = AnswerPipeline::new(search, answerer);
//!
//! let answer = pipeline.run("What is the capital of France?").await?;
//! println!("{}", answer.text);
//! # Ok(())
//! # }
//! ```

pub mod answer;
pub mod pipeline;

// Re-export main types
pub use answer::Answer;
pub use pipeline::{AnswerPipeline, PipelineOptions};

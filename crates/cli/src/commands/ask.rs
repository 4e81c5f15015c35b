//! Ask command handler.
//!
//! Wires the configured adapters into one pipeline run and renders the
//! outcome: a markdown sources block followed by the answer, or a single
//! JSON object with `--json`.

use clap::Args;
use sense_core::{AppConfig, PipelineError, PipelineResult};
use sense_llm::create_answer_client;
use sense_pipeline::{Answer, AnswerPipeline, PipelineOptions};
use sense_search::SearxClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Ask a question and print a cited answer
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Read the question from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Number of search results to ground the answer on
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Per-call deadline in seconds for search and completion
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> PipelineResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        config.validate()?;

        let question = self.get_question()?;

        // Collaborator handles are built once and shared read-only with the
        // pipeline; a misconfigured credential fails here, before any call.
        let search = Arc::new(SearxClient::with_base_url(&config.search_url));
        let answerer = create_answer_client(config)?;

        let deadline = Duration::from_secs(self.timeout.unwrap_or(config.timeout_secs));
        let options = PipelineOptions {
            max_results: self.max_results.unwrap_or(config.max_results),
            search_timeout: deadline,
            answer_timeout: deadline,
        };

        let pipeline = AnswerPipeline::new(search, answerer).with_options(options);
        let answer = pipeline.run(&question).await?;

        if self.json {
            let json = serde_json::to_string_pretty(&answer)?;
            println!("{json}");
        } else {
            print!("{}", render_markdown(&answer));
        }

        Ok(())
    }

    /// Get the question text from the argument or a file.
    fn get_question(&self) -> PipelineResult<String> {
        if let Some(ref question) = self.question {
            return Ok(question.clone());
        }

        if let Some(ref path) = self.file {
            return Ok(std::fs::read_to_string(path)?);
        }

        Err(PipelineError::Config(
            "no question provided; pass one as an argument or via --file".to_string(),
        ))
    }
}

/// Render the numbered sources block and the answer as markdown.
fn render_markdown(answer: &Answer) -> String {
    let mut out = String::from("## Sources\n\n");

    for (index, source) in answer.sources.iter().enumerate() {
        out.push_str(&format!(
            "**{}.** [{}]({})\n",
            index + 1,
            source.title,
            source.url
        ));
        out.push_str(&format!("*{}*\n\n", source.domain));
    }

    out.push_str("---\n\n## Answer\n\n");
    out.push_str(&answer.text);
    out.push('\n');
    out
}

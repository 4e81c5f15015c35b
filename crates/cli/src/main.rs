//! Search Sense CLI
//!
//! Main entry point for the `sense` command-line tool: ask a question, get
//! back a cited answer synthesized from live web search results.

mod commands;

use clap::{Parser, Subcommand};
use commands::AskCommand;
use sense_core::{config::AppConfig, logging, PipelineResult};
use std::path::PathBuf;

/// Search Sense - cited answers from web search and an LLM
#[derive(Parser, Debug)]
#[command(name = "sense")]
#[command(about = "Ask a question, get a cited answer synthesized from web search", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Model identifier for the completion backend
    #[arg(short, long, global = true, env = "SENSE_MODEL")]
    model: Option<String>,

    /// Search backend base URL
    #[arg(long, global = true, env = "SENSE_SEARCH_URL")]
    search_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question and print a cited answer
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> PipelineResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from the environment, then apply CLI overrides
    let config = AppConfig::load()?.with_overrides(
        cli.config,
        cli.model,
        cli.search_url,
        None,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    )?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Search Sense CLI starting");
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Search backend: {}", config.search_url);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

//! Configuration for Search Sense.
//!
//! Settings are merged from multiple sources, later sources winning:
//! built-in defaults, an optional YAML config file, environment variables,
//! and finally command-line flags applied via [`AppConfig::with_overrides`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};

/// Default model identifier for the completion backend.
pub const DEFAULT_MODEL: &str = "x-ai/grok-4-fast:free";

/// Default base URL of the SearXNG-compatible search backend.
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:8888";

/// Default application URL sent as the referer header to the completion
/// backend.
pub const DEFAULT_APP_URL: &str = "http://localhost:7860";

/// Default number of search results embedded into the prompt.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Default per-call deadline for each outbound request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Model identifier for the completion backend
    pub model: String,

    /// API key for the completion backend, if set directly in the environment
    pub api_key: Option<String>,

    /// Name of an environment variable holding the API key (from YAML)
    pub api_key_env: Option<String>,

    /// Base URL override for the completion backend
    pub base_url: Option<String>,

    /// Application URL sent as the referer header on completion calls
    pub app_url: String,

    /// Base URL of the search backend
    pub search_url: String,

    /// Number of search results requested per query
    pub max_results: usize,

    /// Per-call deadline in seconds, applied to search and completion
    /// independently
    pub timeout_secs: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    search: Option<SearchSection>,
    pipeline: Option<PipelineSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    model: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "appUrl")]
    app_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchSection {
    endpoint: Option<String>,
    #[serde(rename = "maxResults")]
    max_results: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PipelineSection {
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            api_key_env: None,
            base_url: None,
            app_url: DEFAULT_APP_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `SENSE_CONFIG`: path to a YAML config file
    /// - `SENSE_MODEL`: model identifier
    /// - `SENSE_API_KEY` / `OPENROUTER_API_KEY`: completion credential
    /// - `SENSE_BASE_URL`: completion backend base URL override
    /// - `SENSE_SEARCH_URL`: search backend base URL
    /// - `SENSE_APP_URL`: referer header value
    /// - `SENSE_MAX_RESULTS`: default result budget
    /// - `SENSE_TIMEOUT_SECS`: per-call deadline
    /// - `RUST_LOG`: log level
    /// - `NO_COLOR`: disable colored output
    pub fn load() -> PipelineResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("SENSE_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Merge the YAML file first so environment variables win over it
        if let Some(path) = config.config_file.clone() {
            if !path.exists() {
                return Err(PipelineError::Config(format!(
                    "config file does not exist: {}",
                    path.display()
                )));
            }
            config.merge_yaml(&path)?;
        }

        if let Ok(model) = std::env::var("SENSE_MODEL") {
            config.model = model;
        }

        config.api_key = std::env::var("SENSE_API_KEY")
            .or_else(|_| std::env::var("OPENROUTER_API_KEY"))
            .ok();

        if let Ok(base_url) = std::env::var("SENSE_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(search_url) = std::env::var("SENSE_SEARCH_URL") {
            config.search_url = search_url;
        }

        if let Ok(app_url) = std::env::var("SENSE_APP_URL") {
            config.app_url = app_url;
        }

        if let Ok(max_results) = std::env::var("SENSE_MAX_RESULTS") {
            config.max_results = max_results.parse().map_err(|_| {
                PipelineError::Config(format!(
                    "SENSE_MAX_RESULTS must be a positive integer, got: {max_results}"
                ))
            })?;
        }

        if let Ok(timeout) = std::env::var("SENSE_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                PipelineError::Config(format!(
                    "SENSE_TIMEOUT_SECS must be a positive integer, got: {timeout}"
                ))
            })?;
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> PipelineResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            PipelineError::Config(format!(
                "failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        if let Some(llm) = file.llm {
            if let Some(model) = llm.model {
                self.model = model;
            }
            if let Some(api_key_env) = llm.api_key_env {
                self.api_key_env = Some(api_key_env);
            }
            if let Some(endpoint) = llm.endpoint {
                self.base_url = Some(endpoint);
            }
            if let Some(app_url) = llm.app_url {
                self.app_url = app_url;
            }
        }

        if let Some(search) = file.search {
            if let Some(endpoint) = search.endpoint {
                self.search_url = endpoint;
            }
            if let Some(max_results) = search.max_results {
                self.max_results = max_results;
            }
        }

        if let Some(pipeline) = file.pipeline {
            if let Some(timeout_secs) = pipeline.timeout_secs {
                self.timeout_secs = timeout_secs;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over both environment variables and
    /// the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        model: Option<String>,
        search_url: Option<String>,
        max_results: Option<usize>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> PipelineResult<Self> {
        if let Some(config_file) = config_file {
            self.merge_yaml(&config_file)?;
            self.config_file = Some(config_file);
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(search_url) = search_url {
            self.search_url = search_url;
        }

        if let Some(max_results) = max_results {
            self.max_results = max_results;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        Ok(self)
    }

    /// Resolve the completion API key.
    ///
    /// Checks the directly-configured key first, then the environment
    /// variable named by the config file's `llm.apiKeyEnv`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        if let Some(ref env_var) = self.api_key_env {
            if let Ok(key) = std::env::var(env_var) {
                return Some(key);
            }
        }

        None
    }

    /// Validate configuration values before any request is made.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.model.trim().is_empty() {
            return Err(PipelineError::Config(
                "model identifier must not be empty".to_string(),
            ));
        }

        if self.max_results == 0 {
            return Err(PipelineError::Config(
                "maxResults must be at least 1".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(PipelineError::Config(
                "timeoutSecs must be at least 1".to_string(),
            ));
        }

        if self.search_url.trim().is_empty() {
            return Err(PipelineError::Config(
                "search endpoint must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

//! Logging infrastructure for Search Sense.
//!
//! Initializes the tracing subscriber once per process. All logs go to
//! stderr so stdout stays clean for answer output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{PipelineError, PipelineResult};

/// Initialize the tracing subscriber with stderr output.
///
/// Filtering follows `RUST_LOG` unless an explicit level is given; ANSI
/// colors are suppressed when `no_color` is set or `NO_COLOR` is present in
/// the environment.
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> PipelineResult<()> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_str = log_level.unwrap_or(&default_level);

    let env_filter = EnvFilter::try_new(filter_str)
        .map_err(|e| PipelineError::Config(format!("invalid log filter: {e}")))?;

    let ansi = !no_color && std::env::var("NO_COLOR").is_err();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(ansi);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| PipelineError::Config(format!("failed to init logging: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_installs_once() {
        // The global subscriber can only be installed once per process.
        assert!(init_logging(Some("debug"), true).is_ok());
        assert!(init_logging(Some("debug"), true).is_err());
    }

    #[test]
    fn test_init_logging_rejects_bad_filter() {
        let result = init_logging(Some("===not-a-filter==="), true);
        assert!(result.is_err());
    }
}

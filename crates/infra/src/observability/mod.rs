//! Logging setup
//!
//! Installs a global `tracing` subscriber. Filtering comes from `RUST_LOG`
//! when set, otherwise from the level passed in. Output goes to stderr so
//! command output on stdout stays clean.

use agenda_domain::{AgendaError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Build the filter used by [`init_logging`].
///
/// # Errors
/// Returns `AgendaError::Config` when `default_level` is not a valid
/// directive.
pub fn build_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| AgendaError::Config(format!("Invalid log level '{default_level}': {e}"))),
    }
}

/// Initialize the global subscriber.
///
/// # Errors
/// Returns `AgendaError::Config` for an invalid level and
/// `AgendaError::Internal` when a subscriber is already installed.
pub fn init_logging(default_level: &str, format: LogFormat) -> Result<()> {
    let filter = build_filter(default_level)?;
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => {
            tracing_subscriber::registry().with(filter).with(fmt_layer.json()).try_init()
        }
        LogFormat::Text => tracing_subscriber::registry().with(filter).with(fmt_layer).try_init(),
    };

    installed.map_err(|e| AgendaError::Internal(format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_config_error() {
        std::env::remove_var("RUST_LOG");
        assert!(matches!(build_filter("info,=="), Err(AgendaError::Config(_))));
        assert!(build_filter("debug").is_ok());
    }
}

//! Logging setup for the `recipe-units` binary.
//!
//! Library modules log through `log` or `tracing`; the subscriber installed
//! here receives both, since `try_init` also installs the `log` bridge.

use anyhow::Result;
use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable selecting the output format
pub const LOG_FORMAT_VAR: &str = "RECIPE_UNITS_LOG_FORMAT";

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// Read the format from `RECIPE_UNITS_LOG_FORMAT`; anything but "json" is compact
    pub fn from_env() -> Self {
        match env::var(LOG_FORMAT_VAR) {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Initialize logging with the INFO default level and the format from the environment
pub fn init() -> Result<()> {
    init_with_level("info", LogFormat::from_env())
}

/// Initialize logging with a specific default level
///
/// `RUST_LOG` still overrides `default_level`. Logs go to stderr so stdout
/// stays clean for JSON output.
pub fn init_with_level(default_level: &str, format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}

/// Initialize logging for tests (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

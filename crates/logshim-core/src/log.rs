//! Output setup for the underlying logging library.
//!
//! Installs the global `tracing` subscriber: JSON lines in production,
//! colorized human-readable lines everywhere else. `RUST_LOG`, when set and
//! valid, replaces the configured minimum level.

use logshim_types::{LogFormat, LoggingConfig, LogshimError, Result};
use std::io;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::format::JsonLines;

/// Initialize the logging system from the process environment.
pub fn init_default() -> Result<()> {
    init(&LoggingConfig::from_env())
}

/// Initialize the logging system from configuration.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().event_format(JsonLines).with_writer(io::stdout))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(config.color)
                    .with_target(false)
                    .with_timer(ChronoLocal::new(config.time_format.clone())),
            )
            .try_init(),
    };

    installed.map_err(|e| LogshimError::Config(format!("Failed to install log subscriber: {}", e)))
}

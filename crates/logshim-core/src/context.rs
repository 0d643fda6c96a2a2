//! Process-wide logging context.
//!
//! A [`LoggingContext`] is built once at start-up and passed to whatever
//! needs the logger or console. It owns the decision of whether console
//! output is routed into structured logging.

use logshim_types::{ConsoleAdapter, LoggingConfig, Result};
use std::sync::Arc;

use crate::console::Console;
use crate::logger::Logger;

/// Logger plus console, with explicit control over console interception.
#[derive(Debug, Clone)]
pub struct LoggingContext {
    logger: Logger,
    console: Arc<Console>,
}

impl LoggingContext {
    /// Context from an existing logger and console.
    pub fn new(logger: Logger, console: Arc<Console>) -> Self {
        Self { logger, console }
    }

    /// Install the `tracing` subscriber described by `config` and build a
    /// context that logs through it, with a stdio console.
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        crate::log::init(config)?;
        Ok(Self::new(Logger::tracing(), Arc::new(Console::stdio())))
    }

    /// The structured logger.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The console handle.
    pub fn console(&self) -> Arc<Console> {
        Arc::clone(&self.console)
    }

    /// Route console calls into the logger's emitter.
    ///
    /// Only the first call installs anything; later calls return `false`
    /// and leave the existing route in place.
    pub fn patch_console(&self) -> bool {
        let installed = self.console.install(self.logger.emitter());
        if installed {
            tracing::debug!(target: crate::emit::TARGET, "console routed into structured logging");
        }
        installed
    }

    /// Whether console interception is active.
    pub fn is_patched(&self) -> bool {
        self.console.is_installed()
    }

    /// Restore the original console behavior.
    pub fn unpatch(&self) -> bool {
        self.console.restore()
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::new(Logger::tracing(), Arc::new(Console::stdio()))
    }
}

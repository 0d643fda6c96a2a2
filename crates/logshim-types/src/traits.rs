//! Core trait definitions for logshim abstractions.

use serde_json::Value;
use std::sync::Arc;
use crate::{ConsoleLevel, LogRecord};
use crate::errors::Result;

/// Sink for finished records.
///
/// This is the seam to the underlying logging library. Implementations must
/// not buffer across calls in a way that reorders records.
pub trait Emitter: Send + Sync {
    /// Hand one record to the sink.
    fn emit(&self, record: &LogRecord) -> Result<()>;
}

/// The console's behavior before any interception is installed.
pub trait ConsoleWriter: Send + Sync {
    /// Write the raw arguments of one console call.
    fn write(&self, method: ConsoleLevel, args: &[Value]) -> Result<()>;
}

/// Reversible console interception.
///
/// Constructed once at process start-up and handed to whoever needs to turn
/// interception on or off.
pub trait ConsoleAdapter: Send + Sync {
    /// Route console calls into `emitter`.
    ///
    /// Returns `false` without changing anything if interception is already
    /// installed.
    fn install(&self, emitter: Arc<dyn Emitter>) -> bool;

    /// Put the original console behavior back.
    ///
    /// Returns `false` if nothing was installed.
    fn restore(&self) -> bool;

    /// Whether interception is currently installed.
    fn is_installed(&self) -> bool;
}

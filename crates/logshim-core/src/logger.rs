//! Structured logger facade.
//!
//! [`Logger`] gives application code four severities plus two conveniences
//! ([`Logger::track_error`] and [`Logger::with_timing`]) and shapes metadata
//! the same way on every path. Each call produces exactly one record; a
//! failing emitter never surfaces to the caller.

use logshim_types::{Emitter, ErrorPayload, Failure, LogLevel, LogRecord, Metadata};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::emit::TracingEmitter;

/// Metadata key under which error shapes are attached.
pub const ERROR_KEY: &str = "error";

/// Metadata key `track_error` stores its code under.
pub const CODE_KEY: &str = "code";

/// Cheap-to-clone handle for emitting structured records.
#[derive(Clone)]
pub struct Logger {
    emitter: Arc<dyn Emitter>,
}

impl Logger {
    /// Logger writing into `emitter`.
    pub fn new(emitter: Arc<dyn Emitter>) -> Self {
        Self { emitter }
    }

    /// Logger writing into `tracing`.
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingEmitter))
    }

    /// The emitter records end up in.
    pub fn emitter(&self) -> Arc<dyn Emitter> {
        Arc::clone(&self.emitter)
    }

    /// Debug-level record.
    pub fn debug(&self, message: &str, meta: Option<Metadata>) {
        self.emit(LogLevel::Debug, message, meta.unwrap_or_default());
    }

    /// Info-level record.
    pub fn info(&self, message: &str, meta: Option<Metadata>) {
        self.emit(LogLevel::Info, message, meta.unwrap_or_default());
    }

    /// Warn-level record.
    pub fn warn(&self, message: &str, meta: Option<Metadata>) {
        self.emit(LogLevel::Warn, message, meta.unwrap_or_default());
    }

    /// Error-level record.
    ///
    /// An [`ErrorPayload::Error`] is nested under `error`; the fields of an
    /// [`ErrorPayload::Structured`] are merged into the top level and win
    /// over same-named keys in `meta`.
    pub fn error(&self, message: &str, error: Option<ErrorPayload>, meta: Option<Metadata>) {
        let mut data = meta.unwrap_or_default();
        match error {
            Some(ErrorPayload::Error(shape)) => {
                data.insert(ERROR_KEY.to_string(), shape.to_value());
            }
            Some(ErrorPayload::Structured(fields)) => data.extend(fields),
            None => {}
        }
        self.emit(LogLevel::Error, message, data);
    }

    /// Error-level record keyed by a stable code.
    ///
    /// The message is the code itself and `code` is always present in the
    /// metadata, though a `code` field in `meta` takes precedence.
    pub fn track_error(&self, code: &str, meta: Option<Metadata>, err: Option<Failure>) {
        let mut data = Metadata::new();
        data.insert(CODE_KEY.to_string(), Value::String(code.to_string()));
        data.extend(meta.unwrap_or_default());

        match err {
            Some(Failure::Error(shape)) => {
                self.error(code, Some(ErrorPayload::Error(shape)), Some(data));
            }
            Some(Failure::Value(value)) => {
                data.insert(ERROR_KEY.to_string(), value);
                self.error(code, None, Some(data));
            }
            None => {
                data.remove(ERROR_KEY);
                self.error(code, None, Some(data));
            }
        }
    }

    fn emit(&self, level: LogLevel, message: &str, metadata: Metadata) {
        let record = LogRecord::new(level, message, metadata);
        // Logging is a side channel; a broken sink must not fail the caller.
        let _ = self.emitter.emit(&record);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::tracing()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

//! Emitters: where finished records go.

use logshim_types::{Emitter, LogLevel, LogRecord, Result};
use parking_lot::Mutex;

/// `tracing` target every emitted event carries.
pub const TARGET: &str = "logshim";

/// Name of the event field holding the JSON-encoded metadata.
pub const META_FIELD: &str = "meta";

/// Emits records as `tracing` events.
///
/// The record message becomes the event message and non-empty metadata is
/// attached as a `meta` field containing compact JSON, which the production
/// formatter flattens back into the output object.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEmitter;

macro_rules! event_at {
    ($level:expr, $message:expr, $meta:expr) => {
        match $meta {
            Some(meta) => tracing::event!(target: TARGET, $level, meta = %meta, "{}", $message),
            None => tracing::event!(target: TARGET, $level, "{}", $message),
        }
    };
}

impl Emitter for TracingEmitter {
    fn emit(&self, record: &LogRecord) -> Result<()> {
        let meta = if record.metadata.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&record.metadata)?)
        };
        let message = record.message.as_str();

        match record.level {
            LogLevel::Debug => event_at!(tracing::Level::DEBUG, message, &meta),
            LogLevel::Info => event_at!(tracing::Level::INFO, message, &meta),
            LogLevel::Warn => event_at!(tracing::Level::WARN, message, &meta),
            LogLevel::Error => event_at!(tracing::Level::ERROR, message, &meta),
        }
        Ok(())
    }
}

/// Keeps every record in memory.
///
/// Useful in tests and for surfacing recent log lines in-process.
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryEmitter {
    /// Create an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything emitted so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Drain everything emitted so far.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Most recent record.
    pub fn last(&self) -> Option<LogRecord> {
        self.records.lock().last().cloned()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&self, record: &LogRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

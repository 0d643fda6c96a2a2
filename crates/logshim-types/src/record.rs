//! Log records and their metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::LogLevel;

/// Structured fields attached to a record.
pub type Metadata = Map<String, Value>;

/// One structured log entry, built per call and handed straight to an emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Severity
    pub level: LogLevel,
    /// Human-readable message
    pub message: String,
    /// Structured fields
    #[serde(default)]
    pub metadata: Metadata,
}

impl LogRecord {
    /// Create a record.
    pub fn new(level: LogLevel, message: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            level,
            message: message.into(),
            metadata,
        }
    }

    /// Look up a metadata field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

/// Build a [`Metadata`] map from `key => value` pairs.
///
/// ```
/// let meta = logshim_types::meta! { "route" => "/home", "status" => 200 };
/// assert_eq!(meta["status"], 200);
/// ```
#[macro_export]
macro_rules! meta {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Metadata::new();
        $(map.insert(($key).to_string(), $crate::__serde_json::json!($value));)+
        map
    }};
}

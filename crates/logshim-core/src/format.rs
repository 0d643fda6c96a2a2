//! Production line format.
//!
//! One JSON object per event:
//!
//! ```text
//! {"level":"info","time":1718000000000,"route":"/","message":"HTTP Request"}
//! ```
//!
//! `level` is the lower-case label, `time` is epoch milliseconds, record
//! metadata is flattened into the object, and the message sits under
//! `message`. Those three keys always come from the event itself.

use chrono::Utc;
use serde_json::{Map, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

use crate::emit::META_FIELD;
use crate::level::from_tracing_level;

const LEVEL_KEY: &str = "level";
const TIME_KEY: &str = "time";
const MESSAGE_KEY: &str = "message";
const RESERVED_KEYS: [&str; 3] = [LEVEL_KEY, TIME_KEY, MESSAGE_KEY];

/// `FormatEvent` writing the production JSON-lines format.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLines;

impl<S, N> FormatEvent<S, N> for JsonLines
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        let level = from_tracing_level(event.metadata().level());
        let line = json_line(level.as_str(), Utc::now().timestamp_millis(), fields);
        writeln!(writer, "{}", line)
    }
}

/// Event fields, with the message and encoded metadata pulled out.
#[derive(Debug, Default)]
struct FieldCollector {
    message: Option<String>,
    meta: Option<String>,
    fields: Map<String, Value>,
}

impl FieldCollector {
    fn put(&mut self, field: &Field, value: Value) {
        match field.name() {
            MESSAGE_KEY => self.message = Some(value_text(value)),
            META_FIELD => self.meta = Some(value_text(value)),
            name => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, Value::String(format!("{:?}", value)));
    }
}

fn json_line(level: &str, time_ms: i64, collected: FieldCollector) -> Value {
    let mut line = Map::new();
    line.insert(LEVEL_KEY.to_string(), Value::from(level));
    line.insert(TIME_KEY.to_string(), Value::from(time_ms));

    let mut extra = collected.fields;
    if let Some(meta) = collected.meta {
        match serde_json::from_str::<Value>(&meta) {
            Ok(Value::Object(map)) => extra.extend(map),
            _ => {
                extra.insert(META_FIELD.to_string(), Value::String(meta));
            }
        }
    }
    for (key, value) in extra {
        if !RESERVED_KEYS.contains(&key.as_str()) {
            line.insert(key, value);
        }
    }

    line.insert(
        MESSAGE_KEY.to_string(),
        Value::String(collected.message.unwrap_or_default()),
    );
    Value::Object(line)
}

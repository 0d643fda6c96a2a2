//! Timing wrapper for asynchronous work.

use logshim_types::{ErrorLike, ErrorPayload, Metadata};
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};

use crate::logger::Logger;

/// Metadata key holding the elapsed time.
pub const DURATION_KEY: &str = "durationMs";

/// Round a duration to whole milliseconds.
pub fn rounded_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}

impl Logger {
    /// Run `operation`, then log how it went and how long it took.
    ///
    /// Success logs `"<label> completed"` at info; failure logs
    /// `"<label> failed"` at error with the error's shape. Either way the
    /// record carries `durationMs` on top of `meta`, and the operation's
    /// result is returned untouched.
    ///
    /// ```no_run
    /// # async fn demo(log: logshim_core::Logger) -> Result<(), std::io::Error> {
    /// let _config = log
    ///     .with_timing("fetch config", || tokio::fs::read_to_string("app.yml"), None)
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub async fn with_timing<T, E, F, Fut>(
        &self,
        label: &str,
        operation: F,
        meta: Option<Metadata>,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: ErrorLike,
    {
        let start = Instant::now();
        let outcome = operation().await;

        let mut data = meta.unwrap_or_default();
        data.insert(DURATION_KEY.to_string(), Value::from(rounded_millis(start.elapsed())));

        match &outcome {
            Ok(_) => self.info(&format!("{} completed", label), Some(data)),
            Err(err) => self.error(
                &format!("{} failed", label),
                Some(ErrorPayload::error(err)),
                Some(data),
            ),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::MemoryEmitter;
    use logshim_types::{meta, LogLevel};
    use serde_json::json;
    use std::sync::Arc;

    fn capture() -> (Logger, Arc<MemoryEmitter>) {
        let sink = Arc::new(MemoryEmitter::new());
        (Logger::new(sink.clone()), sink)
    }

    #[test]
    fn test_rounding() {
        assert_eq!(rounded_millis(Duration::from_micros(1_499)), 1);
        assert_eq!(rounded_millis(Duration::from_micros(1_500)), 2);
        assert_eq!(rounded_millis(Duration::ZERO), 0);
    }

    #[tokio::test]
    async fn test_success_logs_completion() {
        let (log, sink) = capture();
        let result: Result<u32, std::io::Error> = log
            .with_timing(
                "op",
                || async {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(7)
                },
                Some(meta! { "job" => "sync" }),
            )
            .await;

        assert_eq!(result.unwrap(), 7);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Info);
        assert_eq!(records[0].message, "op completed");
        assert_eq!(records[0].field("job"), Some(&json!("sync")));

        let duration = records[0].field(DURATION_KEY).and_then(Value::as_u64).unwrap();
        assert!(duration >= 45, "duration was {}", duration);
        assert!(duration < 1_000, "duration was {}", duration);
    }

    #[tokio::test]
    async fn test_failure_logs_and_propagates() {
        let (log, sink) = capture();
        let result: Result<(), std::io::Error> = log
            .with_timing(
                "op",
                || async { Err(std::io::Error::new(std::io::ErrorKind::Other, "x")) },
                None,
            )
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "x");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Error);
        assert_eq!(records[0].message, "op failed");
        assert_eq!(records[0].field("error").unwrap()["message"], "x");
        assert!(records[0].field(DURATION_KEY).is_some());
    }

    #[tokio::test]
    async fn test_non_error_failure_is_coerced() {
        let (log, sink) = capture();
        let result: Result<(), String> = log
            .with_timing("parse", || async { Err("bad input".to_string()) }, None)
            .await;

        assert_eq!(result.unwrap_err(), "bad input");
        let error = sink.last().unwrap().field("error").cloned().unwrap();
        assert_eq!(error["name"], "Error");
        assert_eq!(error["message"], "bad input");
    }

    #[tokio::test]
    async fn test_duration_overrides_caller_field() {
        let (log, sink) = capture();
        let _: Result<(), anyhow::Error> = log
            .with_timing("noop", || async { Ok(()) }, Some(meta! { "durationMs" => "caller" }))
            .await;

        assert!(sink.last().unwrap().field(DURATION_KEY).unwrap().is_u64());
    }
}

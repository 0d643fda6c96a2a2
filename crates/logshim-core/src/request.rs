//! Request logging hook.

use http::header::USER_AGENT;
use http::Request;
use logshim_types::Metadata;
use serde_json::Value;

use crate::logger::Logger;

/// Path fragments whose requests are never logged: event streams, framework
/// assets and health probes.
pub const SKIPPED_PATH_FRAGMENTS: [&str; 4] = ["/events", "_remix", "/health", "/heartbeat"];

/// Whether requests for `path` are worth a log line.
pub fn is_logged_path(path: &str) -> bool {
    !SKIPPED_PATH_FRAGMENTS.iter().any(|fragment| path.contains(fragment))
}

/// Log an incoming request at info level unless its path is filtered out.
///
/// Returns whether a record was emitted.
pub fn log_request<B>(logger: &Logger, request: &Request<B>) -> bool {
    let path = request.uri().path();
    if !is_logged_path(path) {
        return false;
    }

    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(Value::from)
        .unwrap_or(Value::Null);

    let mut meta = Metadata::new();
    meta.insert("method".to_string(), Value::from(request.method().as_str()));
    meta.insert("pathname".to_string(), Value::from(path));
    meta.insert("userAgent".to_string(), user_agent);

    logger.info("HTTP Request", Some(meta));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::MemoryEmitter;
    use logshim_types::LogLevel;
    use serde_json::json;
    use std::sync::Arc;

    fn capture() -> (Logger, Arc<MemoryEmitter>) {
        let sink = Arc::new(MemoryEmitter::new());
        (Logger::new(sink.clone()), sink)
    }

    #[test]
    fn test_logs_request_fields() {
        let (log, sink) = capture();
        let request = Request::post("https://app.example.com/api/orders?page=2")
            .header("user-agent", "curl/8.4")
            .body(())
            .unwrap();

        assert!(log_request(&log, &request));

        let record = sink.last().unwrap();
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.message, "HTTP Request");
        assert_eq!(record.field("method"), Some(&json!("POST")));
        assert_eq!(record.field("pathname"), Some(&json!("/api/orders")));
        assert_eq!(record.field("userAgent"), Some(&json!("curl/8.4")));
    }

    #[test]
    fn test_missing_user_agent_is_null() {
        let (log, sink) = capture();
        let request = Request::get("/").body(()).unwrap();

        assert!(log_request(&log, &request));
        assert_eq!(sink.last().unwrap().field("userAgent"), Some(&Value::Null));
    }

    #[test]
    fn test_noisy_paths_are_skipped() {
        let (log, sink) = capture();
        for path in ["/events/stream", "/_remix/assets.js", "/health", "/api/heartbeat"] {
            let request = Request::get(path).body(()).unwrap();
            assert!(!log_request(&log, &request), "{} should be skipped", path);
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_path_filter() {
        assert!(is_logged_path("/dashboard"));
        // fragments match anywhere in the path
        assert!(!is_logged_path("/healthy-recipes"));
        assert!(!is_logged_path("/build/_remix/chunk.js"));
    }
}

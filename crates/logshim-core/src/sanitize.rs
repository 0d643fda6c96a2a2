//! Console text sanitization.
//!
//! Console arguments are reduced to one printable line before they become a
//! log message: terminal escape sequences are stripped, stray control
//! characters dropped, whitespace collapsed and overlong text truncated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Longest message kept, in characters, before the truncation marker.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Appended to truncated messages.
pub const TRUNCATION_MARKER: &str = "...";

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x1B\x{9B}][\[()\]#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]")
        .expect("ANSI escape pattern is valid")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Sanitize any console argument.
///
/// Strings are used as-is, `null` becomes empty, everything else is rendered
/// as compact JSON first.
pub fn sanitize(value: &Value) -> String {
    match value {
        Value::String(s) => sanitize_str(s),
        Value::Null => String::new(),
        other => sanitize_str(&other.to_string()),
    }
}

/// Sanitize a string.
pub fn sanitize_str(input: &str) -> String {
    let stripped = strip_ansi(input);
    let printable: String = stripped
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();
    let single_line = WHITESPACE_RUN.replace_all(&printable, " ");
    truncate(single_line.trim())
}

/// Remove ANSI/VT escape sequences.
pub fn strip_ansi(input: &str) -> String {
    ANSI_ESCAPE.replace_all(input, "").into_owned()
}

fn truncate(input: &str) -> String {
    match input.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((cut, _)) => format!("{}{}", &input[..cut], TRUNCATION_MARKER),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_strips_color_codes() {
        assert_eq!(sanitize_str("a\x1b[31mb"), "ab");
        assert_eq!(sanitize_str("\x1b[1;32mready\x1b[0m"), "ready");
        assert_eq!(sanitize_str("\u{9b}2Kcleared"), "cleared");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(sanitize_str("  one\n\ttwo   three \r\n"), "one two three");
        assert_eq!(sanitize_str(" \n\t "), "");
    }

    #[test]
    fn test_drops_lone_control_characters() {
        assert_eq!(sanitize_str("bell\x07 and \x1b escape"), "bell and escape");
    }

    #[test]
    fn test_truncates_long_messages() {
        let long = "x".repeat(MAX_MESSAGE_CHARS + 10);
        let out = sanitize_str(&long);
        assert_eq!(out.chars().count(), MAX_MESSAGE_CHARS + TRUNCATION_MARKER.len());
        assert!(out.ends_with(TRUNCATION_MARKER));

        let exact = "y".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(sanitize_str(&exact), exact);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let long = "é".repeat(MAX_MESSAGE_CHARS + 1);
        let out = sanitize_str(&long);
        assert_eq!(out.chars().count(), MAX_MESSAGE_CHARS + 3);
    }

    #[test]
    fn test_non_string_values() {
        assert_eq!(sanitize(&Value::Null), "");
        assert_eq!(sanitize(&json!(42)), "42");
        assert_eq!(sanitize(&json!(false)), "false");
        assert_eq!(sanitize(&json!({"a": "b"})), r#"{"a":"b"}"#);
        assert_eq!(sanitize(&json!("  padded ")), "padded");
    }

    proptest! {
        #[test]
        fn prop_no_escape_or_control_characters(prefix in ".*", code in 0u8..108, suffix in ".*") {
            let input = format!("{}\x1b[{}m{}", prefix, code, suffix);
            let out = sanitize_str(&input);
            prop_assert!(!out.contains('\x1b'));
            prop_assert!(!out.chars().any(|c| c.is_control()));
        }

        #[test]
        fn prop_length_is_bounded(input in ".{0,3000}") {
            let out = sanitize_str(&input);
            prop_assert!(out.chars().count() <= MAX_MESSAGE_CHARS + TRUNCATION_MARKER.len());
        }

        #[test]
        fn prop_long_input_ends_with_marker(body in "[a-z]{2001,2600}") {
            let out = sanitize_str(&body);
            prop_assert!(out.ends_with(TRUNCATION_MARKER));
            prop_assert_eq!(out.chars().count(), MAX_MESSAGE_CHARS + TRUNCATION_MARKER.len());
        }

        #[test]
        fn prop_never_panics_on_numbers(n in any::<f64>(), i in any::<i64>()) {
            let _ = sanitize(&json!(n));
            let _ = sanitize(&json!(i));
        }
    }
}

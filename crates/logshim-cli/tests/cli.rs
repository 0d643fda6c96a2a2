use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn logshim() -> Command {
    let mut cmd = Command::cargo_bin("logshim").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn production() -> Command {
    let mut cmd = logshim();
    cmd.env("NODE_ENV", "production");
    cmd
}

fn json_lines(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_sanitize_stdin() {
    logshim()
        .arg("sanitize")
        .write_stdin("\x1b[31mred\x1b[0m   text\n\n  \t\nplain\n")
        .assert()
        .success()
        .stdout("red text\nplain\n");
}

#[test]
fn test_emit_production_json() {
    let output = production()
        .args(["emit", "info", "server started", "--meta", r#"{"port":3000}"#])
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = json_lines(&output.stdout);
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line["level"], "info");
    assert_eq!(line["message"], "server started");
    assert_eq!(line["port"], 3000);
    assert!(line["time"].is_u64());
}

#[test]
fn test_emit_console_method_name() {
    let output = production()
        .args(["emit", "log", "from console"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = json_lines(&output.stdout);
    assert_eq!(lines[0]["level"], "info");
    assert_eq!(lines[0]["message"], "from console");
}

#[test]
fn test_debug_filtered_in_production() {
    production()
        .args(["emit", "debug", "noise"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_emit_unknown_level() {
    production()
        .args(["emit", "loud", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown level 'loud'"));
}

#[test]
fn test_emit_meta_must_be_object() {
    production()
        .args(["emit", "info", "hello", "--meta", "[1,2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

#[cfg(unix)]
#[test]
fn test_run_routes_child_output() {
    let output = production()
        .args(["run", "--", "sh", "-c", "echo hi; echo oops >&2; exit 3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let lines = json_lines(&output.stdout);
    let find = |message: &str| {
        lines
            .iter()
            .find(|line| line["message"] == message)
            .unwrap_or_else(|| panic!("no line with message {:?} in {:?}", message, lines))
    };

    assert_eq!(find("hi")["level"], "info");
    assert_eq!(find("oops")["level"], "error");
    let done = find("sh completed");
    assert!(done["durationMs"].is_u64());
    assert_eq!(find("sh exited unsuccessfully")["exitCode"], 3);
}

#[test]
fn test_run_missing_program() {
    production()
        .args(["run", "definitely-not-a-real-program-logshim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to start"));
}

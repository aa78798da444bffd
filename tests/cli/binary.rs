//! End-to-end runs of the toastline executable

use std::io::Write;
use std::process::{Command, Output};

const FAST_CONFIG: &str = r#"
fade-in-speed = 0
fade-out-speed = 0
collapse-speed = 0
time = 20
"#;

fn run(config: &str, args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("toastline.toml");
    std::fs::File::create(&config_path)
        .and_then(|mut f| f.write_all(config.as_bytes()))
        .unwrap();

    Command::new(env!("CARGO_BIN_EXE_toastline"))
        .arg("-c")
        .arg(&config_path)
        .arg("--no-color")
        .args(args)
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .output()
        .expect("toastline should start")
}

#[test]
fn test_messages_are_shown_then_dismissed() {
    let output = run(FAST_CONFIG, &["CI|Build passed", "second"]);
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[1] CI: Build passed"), "got: {}", stdout);
    assert!(stdout.contains("[2] second"), "got: {}", stdout);
    assert!(stdout.contains("[1] dismissed: CI"), "got: {}", stdout);
    assert!(stdout.contains("[2] dismissed: second"), "got: {}", stdout);
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn test_cap_shows_one_at_a_time() {
    let output = run(FAST_CONFIG, &["-m", "1", "one", "two"]);
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["[1] one", "[1] dismissed: one", "[2] two", "[2] dismissed: two"]
    );
}

#[test]
fn test_events_are_json_lines_on_stderr() {
    let output = run(FAST_CONFIG, &["--events", "hello"]);
    assert!(output.status.success(), "{:?}", output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    let kinds: Vec<String> = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .map(|event| event["event_type"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(kinds, vec!["queued", "opened", "shown", "closing", "removed"]);
}

#[test]
fn test_bad_config_value_exits_with_error() {
    let output = run("max-to-display = -1\n", &["hello"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max-to-display"), "got: {}", stderr);
}

#[test]
fn test_missing_message_is_a_usage_error() {
    let output = run(FAST_CONFIG, &[]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_version_mentions_package_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_toastline"))
        .arg("--version")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "got: {}", stdout);
}

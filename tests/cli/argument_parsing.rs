//! CLI argument parsing tests

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use toastline::app::cli::args::*;
use toastline::app::cli::config::Settings;

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("toastline").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_messages_keep_their_order() {
    let args = parse(&["first", "Second|two", "third"]);
    let texts: Vec<_> = args
        .notifications()
        .into_iter()
        .map(|n| n.text.unwrap_or_default())
        .collect();
    assert_eq!(texts, vec!["first", "two", "third"]);
}

#[test]
fn test_short_flags() {
    let args = parse(&[
        "-c", "cfg.toml", "-m", "3", "-t", "250", "-l", "debug", "-o", "json", "-f", "out.log",
        "msg",
    ]);
    assert_eq!(args.config_file, Some(PathBuf::from("cfg.toml")));
    assert_eq!(args.max_to_display, Some(3));
    assert_eq!(args.time, Some(250));
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("json"));
    assert_eq!(args.log_file, Some(PathBuf::from("out.log")));
}

#[test]
fn test_unknown_log_level_is_rejected() {
    assert!(Args::try_parse_from(["toastline", "-l", "loud", "msg"]).is_err());
}

#[test]
fn test_unknown_log_format_is_rejected() {
    assert!(Args::try_parse_from(["toastline", "-o", "xml", "msg"]).is_err());
}

#[test]
fn test_verbose_and_quiet_conflict() {
    assert!(Args::try_parse_from(["toastline", "-v", "-q", "msg"]).is_err());
}

#[test]
fn test_absent_flags_leave_settings_alone() {
    let mut settings = Settings::default();
    settings.options.max_to_display = 4;
    settings.color = Some(true);

    parse(&["msg"]).apply_overrides(&mut settings);

    assert_eq!(settings.options.max_to_display, 4);
    assert_eq!(settings.color, Some(true));
}

#[test]
fn test_speed_flags_override() {
    let mut settings = Settings::default();
    parse(&["--fade-in", "fast", "--fade-out", "0", "msg"]).apply_overrides(&mut settings);

    assert_eq!(settings.options.fade_in_speed, Duration::from_millis(200));
    assert_eq!(settings.options.fade_out_speed, Duration::ZERO);
}

#[test]
fn test_message_with_only_a_title_separator() {
    let params = parse_message("Deploy|");
    assert_eq!(params.title.as_deref(), Some("Deploy"));
    assert_eq!(params.text.as_deref(), Some(""));
}

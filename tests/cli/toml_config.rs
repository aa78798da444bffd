//! CLI TOML configuration tests

use clap::Parser;
use std::io::Write;
use std::time::Duration;
use toastline::app::cli::args::Args;
use toastline::app::cli::config::*;
use toastline::toast::TimerScope;
use toml::Table;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_file_values_then_command_line() {
    let file = config_file(
        r#"
        max-to-display = 2
        time = 3000
        position = "bottom-right"
        timer-scope = "shared"
        "#,
    );

    let mut settings = Settings::load(Some(file.path())).await.unwrap();
    let args = Args::try_parse_from(["toastline", "-t", "900", "msg"]).unwrap();
    args.apply_overrides(&mut settings);

    assert_eq!(settings.options.max_to_display, 2);
    assert_eq!(settings.options.default_visible_time, Duration::from_millis(900));
    assert_eq!(settings.options.position, "bottom-right");
    assert_eq!(settings.options.timer_scope, TimerScope::Shared);
}

#[tokio::test]
async fn test_empty_file_gives_defaults() {
    let file = config_file("");
    let settings = Settings::load(Some(file.path())).await.unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_color_keys_last_one_wins() {
    let mut settings = Settings::default();
    let mut config = Table::new();
    config.insert("color".to_string(), toml::Value::Boolean(true));
    settings.apply_toml_values(&config).unwrap();
    assert_eq!(settings.color, Some(true));

    let mut config = Table::new();
    config.insert("no-color".to_string(), toml::Value::Boolean(true));
    settings.apply_toml_values(&config).unwrap();
    assert_eq!(settings.color, Some(false));
}

#[test]
fn test_invalid_value_names_the_key() {
    let mut config = Table::new();
    config.insert("max-to-display".to_string(), toml::Value::Boolean(true));

    let err = Settings::default().apply_toml_values(&config).unwrap_err();
    assert!(err.to_string().contains("max-to-display"), "got: {}", err);
}

#[test]
fn test_default_config_path_location() {
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("toastline/toastline.toml"));
    }
}

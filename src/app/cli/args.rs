//! Command-line arguments
//!
//! Everything that can also come from the configuration file is optional
//! here, so that "not given on the command line" can be told apart from
//! "given with the default value".

use crate::app::cli::config::Settings;
use crate::toast::{parse_speed, NotificationParams};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "toastline")]
#[command(about = "Show queued notifications in the terminal")]
#[command(version = crate::core::version::VERSION_STRING)]
#[command(after_help = "A MESSAGE is either \"text\" or \"title|text\".")]
pub struct Args {
    /// Notifications to show, in order
    #[arg(value_name = "MESSAGE", required = true)]
    pub messages: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Maximum notifications on screen at once (0 = unlimited)
    #[arg(short = 'm', long = "max-to-display", value_name = "COUNT")]
    pub max_to_display: Option<usize>,

    /// How long each notification stays visible, in milliseconds
    #[arg(short = 't', long = "time", value_name = "MS")]
    pub time: Option<u64>,

    /// Fade-in speed: milliseconds or slow/medium/fast
    #[arg(long = "fade-in", value_name = "SPEED", value_parser = parse_speed_arg)]
    pub fade_in: Option<Duration>,

    /// Fade-out speed: milliseconds or slow/medium/fast
    #[arg(long = "fade-out", value_name = "SPEED", value_parser = parse_speed_arg)]
    pub fade_out: Option<Duration>,

    /// Where the notification container is anchored
    #[arg(long = "position", value_name = "POSITION")]
    pub position: Option<String>,

    /// Keep notifications until interrupted
    #[arg(long = "sticky", action = ArgAction::SetTrue)]
    pub sticky: bool,

    /// Print lifecycle events as JSON lines on stderr
    #[arg(long = "events", action = ArgAction::SetTrue)]
    pub events: bool,

    /// Force colored output (overrides TTY detection)
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// More log output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Log level (overrides -v/-q)
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

fn parse_speed_arg(value: &str) -> Result<Duration, String> {
    parse_speed(value).ok_or_else(|| {
        format!("'{value}' is neither milliseconds nor one of slow, medium, normal, fast")
    })
}

impl Args {
    /// `--color`/`--no-color`, or `None` when neither was given
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Net verbosity: `-v` count minus `-q` count
    pub fn verbosity(&self) -> i8 {
        let verbose = i8::try_from(self.verbose).unwrap_or(i8::MAX);
        let quiet = i8::try_from(self.quiet).unwrap_or(i8::MAX);
        verbose.saturating_sub(quiet)
    }

    /// Command-line values win over the configuration file
    pub fn apply_overrides(&self, settings: &mut Settings) {
        let options = &mut settings.options;
        if let Some(max) = self.max_to_display {
            options.max_to_display = max;
        }
        if let Some(time) = self.time {
            options.default_visible_time = Duration::from_millis(time);
        }
        if let Some(speed) = self.fade_in {
            options.fade_in_speed = speed;
        }
        if let Some(speed) = self.fade_out {
            options.fade_out_speed = speed;
        }
        if let Some(position) = &self.position {
            options.position = position.clone();
        }
        if let Some(color) = self.color_override() {
            settings.color = Some(color);
        }
        if let Some(level) = &self.log_level {
            settings.log_level = Some(level.clone());
        }
        if let Some(format) = &self.log_format {
            settings.log_format = Some(format.clone());
        }
        if let Some(file) = &self.log_file {
            settings.log_file = log_file_target(file);
        }
        if self.events {
            settings.events = true;
        }
    }

    /// One request per positional message
    pub fn notifications(&self) -> Vec<NotificationParams> {
        self.messages
            .iter()
            .map(|message| parse_message(message).sticky(self.sticky))
            .collect()
    }
}

/// `"none"` and `"-"` switch file logging off
pub(crate) fn log_file_target(path: &std::path::Path) -> Option<PathBuf> {
    match path.to_str() {
        Some(p) if p.eq_ignore_ascii_case("none") || p == "-" => None,
        _ => Some(path.to_path_buf()),
    }
}

/// Split `"title|text"`; a message without `|` is text only
pub fn parse_message(message: &str) -> NotificationParams {
    match message.split_once('|') {
        Some((title, text)) if !title.trim().is_empty() => {
            NotificationParams::new(text.trim()).title(title.trim())
        }
        Some((_, text)) => NotificationParams::new(text.trim()),
        None => NotificationParams::new(message),
    }
}

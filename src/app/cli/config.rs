//! TOML configuration file parsing and loading
//!
//! The file is a flat table of kebab-case keys. Every key is optional; keys
//! this version does not know are reported and skipped so that one file can
//! serve several versions.
//!
//! ```toml
//! position = "bottom-right"
//! max-to-display = 3
//! time = 4000
//! fade-in-speed = "fast"
//! fade-out-speed = 800
//! close-on-click = true
//! log-level = "info"
//! ```

use crate::app::cli::args::log_file_target;
use crate::core::error_handling::ContextualError;
use crate::toast::{parse_speed, Options, TimerScope};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Directory and file name of the default configuration under `dirs::config_dir()`
pub const CONFIG_DIR_NAME: &str = "toastline";
pub const CONFIG_FILE_NAME: &str = "toastline.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::InvalidValue { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Everything a run needs once file and command line are merged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub options: Options,
    pub color: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub events: bool,
}

impl Settings {
    /// Load the given file, or the default one if it exists
    ///
    /// An explicitly named file must exist; a missing default file just means
    /// built-in defaults.
    pub async fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("No configuration file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        log::debug!("Loading configuration from {}", path.display());
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
        let table = toml::from_str::<toml::Table>(&contents).map_err(|source| {
            ConfigError::Parse {
                path: path.clone(),
                source,
            }
        })?;

        let mut settings = Self::default();
        settings.apply_toml_values(&table)?;
        Ok(settings)
    }

    /// Apply TOML configuration values on top of the current settings
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> Result<(), ConfigError> {
        for (key, value) in config {
            match key.as_str() {
                "position" => self.options.position = string_value(key, value)?,
                "class-name" => self.options.class_name = string_value(key, value)?,
                "fade-in-speed" => self.options.fade_in_speed = speed_value(key, value)?,
                "fade-out-speed" => self.options.fade_out_speed = speed_value(key, value)?,
                "collapse-speed" => self.options.collapse_speed = speed_value(key, value)?,
                "time" => self.options.default_visible_time = millis_value(key, value)?,
                "max-to-display" => {
                    self.options.max_to_display = count_value(key, value)?;
                }
                "close-on-click" => self.options.close_on_click = bool_value(key, value)?,
                "timer-scope" => {
                    let scope = string_value(key, value)?;
                    self.options.timer_scope = TimerScope::from_str(&scope).map_err(|_| {
                        ConfigError::invalid(
                            key,
                            format!("timer-scope must be \"per-notification\" or \"shared\", not \"{scope}\""),
                        )
                    })?;
                }
                "color" => self.color = Some(bool_value(key, value)?),
                "no-color" => self.color = Some(!bool_value(key, value)?),
                "log-level" => self.log_level = Some(string_value(key, value)?),
                "log-format" => self.log_format = Some(string_value(key, value)?),
                "log-file" => {
                    self.log_file = log_file_target(Path::new(&string_value(key, value)?));
                }
                "events" => self.events = bool_value(key, value)?,
                unknown => log::warn!("Ignoring unknown configuration key '{}'", unknown),
            }
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn string_value(key: &str, value: &toml::Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::invalid(key, format!("{key} must be a string")))
}

fn bool_value(key: &str, value: &toml::Value) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::invalid(key, format!("{key} must be true or false")))
}

fn count_value(key: &str, value: &toml::Value) -> Result<usize, ConfigError> {
    value
        .as_integer()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| ConfigError::invalid(key, format!("{key} must be a non-negative integer")))
}

fn millis_value(key: &str, value: &toml::Value) -> Result<Duration, ConfigError> {
    count_value(key, value)
        .map(|ms| Duration::from_millis(ms as u64))
        .map_err(|_| ConfigError::invalid(key, format!("{key} must be a number of milliseconds")))
}

fn speed_value(key: &str, value: &toml::Value) -> Result<Duration, ConfigError> {
    let parsed = match value {
        toml::Value::Integer(n) => u64::try_from(*n).ok().map(Duration::from_millis),
        toml::Value::String(s) => parse_speed(s),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ConfigError::invalid(
            key,
            format!("{key} must be milliseconds or one of \"slow\", \"medium\", \"normal\", \"fast\""),
        )
    })
}

//! Command-line arguments and the configuration file they can point at

pub mod args;
pub mod config;

pub use args::{parse_message, Args};
pub use config::{default_config_path, ConfigError, Settings};

//! Application startup
//!
//! Startup runs in three stages:
//! 1. parse the command line and load the configuration file
//! 2. start logging with the merged settings and report a bad configuration
//! 3. run a notification service on stdout until every message has gone

use crate::app::cli::args::Args;
use crate::app::cli::config::{ConfigError, Settings};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{init_logging, level_for_verbosity};
use crate::core::styles::palette_to_clap;
use crate::render::ConsoleRenderer;
use crate::service::ToastService;
use crate::toast::{LifecycleEvent, NotificationId, RemoveAllOptions};
use clap::{CommandFactory, FromArgMatches};
use std::collections::BTreeSet;
use std::io::IsTerminal;
use tokio::sync::broadcast::error::RecvError;

/// Parse the process arguments and run; returns the exit code
pub async fn run() -> i32 {
    let styled = std::io::stdout().is_terminal();
    let matches = match Args::command()
        .styles(palette_to_clap(styled))
        .try_get_matches()
    {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };
    match Args::from_arg_matches(&matches) {
        Ok(args) => run_with(args).await,
        Err(e) => {
            let _ = e.print();
            e.exit_code()
        }
    }
}

/// Run with already parsed arguments; returns the exit code
pub async fn run_with(args: Args) -> i32 {
    // Stage 1: configuration, before logging so the file can choose the format
    let loaded = Settings::load(args.config_file.as_deref()).await;
    let settings = merge_settings(&args, loaded.as_ref().ok());
    let use_color = settings
        .color
        .unwrap_or_else(|| std::io::stdout().is_terminal());

    // Stage 2: logging
    let level = resolve_log_level(&args, &settings);
    let log_file = settings.log_file.as_ref().map(|p| p.to_string_lossy());
    if let Err(e) = init_logging(
        Some(level.as_str()),
        settings.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Cannot start logging: {}", e);
        return 1;
    }
    if let Err(e) = loaded {
        report_config_error(&e);
        return 1;
    }
    log::debug!("Settings: {:?}", settings);

    // Stage 3: show everything
    let service = ToastService::spawn(settings.options.clone(), |sink| {
        ConsoleRenderer::new(std::io::stdout(), sink).with_color(use_color)
    });
    let code = show_all(&service, &args, settings.events).await;
    service.shutdown().await;
    code
}

/// The file's settings with the command line applied on top
pub fn merge_settings(args: &Args, loaded: Option<&Settings>) -> Settings {
    let mut settings = loaded.cloned().unwrap_or_default();
    args.apply_overrides(&mut settings);
    settings
}

/// `--log-level` wins, then `-v`/`-q`, then the configuration file
pub fn resolve_log_level(args: &Args, settings: &Settings) -> String {
    if let Some(level) = &args.log_level {
        return level.clone();
    }
    match (args.verbosity(), &settings.log_level) {
        (0, Some(level)) => level.clone(),
        (verbosity, _) => level_for_verbosity(verbosity).to_string(),
    }
}

fn report_config_error(error: &ConfigError) {
    log_error_with_context(error, "Loading configuration");
}

async fn show_all(service: &ToastService, args: &Args, print_events: bool) -> i32 {
    // subscribe first so no event of ours is missed
    let mut events = service.subscribe();
    let mut outstanding = BTreeSet::new();

    for params in args.notifications() {
        match service.add(params).await {
            Ok(id) => {
                outstanding.insert(id);
            }
            Err(e) => {
                log_error_with_context(&e, "Adding notification");
                return 1;
            }
        }
    }
    log::info!("{} notification(s) queued", outstanding.len());

    loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(event) => {
                    if print_events {
                        eprintln!("{}", event.to_json_line());
                    }
                    if settle(&mut outstanding, &event) {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    log::warn!("Missed {} lifecycle event(s)", missed);
                    match service.stats().await {
                        Ok(stats) if !stats.idle => {}
                        _ => break,
                    }
                }
                Err(RecvError::Closed) => break,
            },

            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    log::warn!("Cannot listen for interrupts: {}", e);
                    return 1;
                }
                log::info!("Interrupted, dismissing all notifications");
                if service.remove_all(RemoveAllOptions::default()).is_err() {
                    break;
                }
            }
        }
    }
    0
}

/// Forget `event`'s notification once it is gone; true when none is left
fn settle(outstanding: &mut BTreeSet<NotificationId>, event: &LifecycleEvent) -> bool {
    if event.event_type.is_terminal() {
        outstanding.remove(&event.id);
    }
    outstanding.is_empty()
}

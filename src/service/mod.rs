//! Asynchronous notification service
//!
//! Hosts a [`Controller`](crate::toast::Controller) on a tokio task so that
//! callers on any task can add and remove notifications, while fade timers
//! and renderer completions are handled in one place.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use toastline::render::ConsoleRenderer;
//! use toastline::service::ToastService;
//! use toastline::toast::{NotificationParams, Options};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ToastService::spawn(Options::default(), |sink| {
//!     ConsoleRenderer::new(std::io::stdout(), sink)
//! });
//! let mut events = service.subscribe();
//!
//! service.add(NotificationParams::new("Hello").title("toastline")).await?;
//! while let Ok(event) = events.recv().await {
//!     println!("{}", event.to_json_line());
//!     if service.stats().await?.idle {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Internal modules - all access should go through api module
pub(crate) mod runner;

// Public API module
pub mod api;

pub use api::{QueueStats, ToastService, UiEventSink, EVENT_CHANNEL_CAPACITY};

#[cfg(test)]
mod tests;

//! Toast Notification Core
//!
//! A bounded queue of transient notifications and the lifecycle each of them
//! goes through between `add` and removal.
//!
//! # Overview
//!
//! - **Admission**: every accepted request gets a fresh id and waits in FIFO
//!   order until fewer than `max_to_display` notifications occupy a slot
//! - **Lifecycle**: `Queued → Visible → FadingOut → Removed`, with hooks
//!   around opening and closing
//! - **Timers**: non-sticky notifications fade after their visible time;
//!   hovering suspends the timer and leaving re-arms it in full
//! - **Presentation**: everything on screen is delegated to a [`Renderer`],
//!   which reports finished animations and pointer activity as [`UiEvent`]s
//!
//! # Architecture
//!
//! ```text
//!   add/remove/remove_all         fire_due_timers(now)
//!            │                            │
//!            ▼                            ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     Controller                      │
//! │  ┌────────────────┐        ┌──────────────────────┐ │
//! │  │ AdmissionQueue │──open─▶│ live notifications   │ │
//! │  │  (FIFO, slots) │◀─free──│  (state + deadline)  │ │
//! │  └────────────────┘        └──────────────────────┘ │
//! └──────────────┬───────────────────────▲──────────────┘
//!                │ render/fade/collapse  │ UiEvent
//!                ▼                       │
//!         ┌──────────────────────────────┴──┐
//!         │            Renderer             │
//!         └─────────────────────────────────┘
//! ```
//!
//! The controller never sleeps and never spawns. Hosting it on a runtime is
//! the job of [`crate::service`].

mod admission;
mod controller;
mod error;
mod event;
mod lifecycle;
mod options;
mod record;
mod renderer;

pub use admission::AdmissionQueue;
pub use controller::Controller;
pub use error::{RenderError, ToastError, ToastResult};
pub use event::{LifecycleEvent, LifecycleEventType};
pub use lifecycle::CloseReason;
pub use options::{
    parse_speed, BulkCallback, Options, RemoveAllOptions, RemoveOptions, Speed, TimerScope,
    DEFAULT_COLLAPSE_SPEED, DEFAULT_FADE_IN_SPEED, DEFAULT_FADE_OUT_SPEED, DEFAULT_POSITION,
    DEFAULT_VISIBLE_TIME,
};
pub use record::{
    BeforeOpenFn, Callbacks, CloseFn, LifecycleState, NotificationId, NotificationParams,
    NotificationRecord, OpenFn, PendingNotification,
};
pub use renderer::{Renderer, UiEvent};

#[cfg(test)]
mod tests;

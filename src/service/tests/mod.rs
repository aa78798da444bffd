//! Test modules for the notification service
//!
//! All suites run on tokio's paused clock, so animation and fade timings
//! are exact.

mod support;

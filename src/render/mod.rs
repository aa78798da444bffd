//! Concrete renderers
//!
//! The controller only knows the [`Renderer`](crate::toast::Renderer) trait;
//! this module holds the implementations shipped with the crate.

mod console;

pub use console::{ConsoleHandle, ConsoleRenderer};

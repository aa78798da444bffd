//! The presentation boundary
//!
//! A renderer materialises notifications and animates them, but never
//! decides anything: every animation it starts is reported back as a
//! [`UiEvent`] once it completes, and so is every pointer interaction on an
//! element whose events have been bound.

use crate::toast::error::RenderError;
use crate::toast::record::{NotificationId, NotificationRecord};
use std::fmt;
use std::time::Duration;

/// Presentation collaborator driven by the [`Controller`](crate::toast::Controller)
pub trait Renderer {
    /// Renderer-side reference to one materialised notification
    type Handle: Clone + fmt::Debug;

    fn container_exists(&self) -> bool;

    fn create_container(&mut self, position: &str) -> Result<(), RenderError>;

    /// Remove the container together with any element still inside it
    fn remove_container(&mut self) -> Result<(), RenderError>;

    /// Fade the whole container out; reported with [`UiEvent::ContainerFadedOut`]
    fn fade_out_container(&mut self, speed: Duration) -> Result<(), RenderError>;

    /// Create the (still hidden) element for `record`
    fn render(&mut self, record: &NotificationRecord) -> Result<Self::Handle, RenderError>;

    /// Reported with [`UiEvent::FadeInDone`]
    fn fade_in(&mut self, handle: &Self::Handle, speed: Duration) -> Result<(), RenderError>;

    /// Reported with [`UiEvent::FadeOutDone`]
    fn fade_out(&mut self, handle: &Self::Handle, speed: Duration) -> Result<(), RenderError>;

    /// Reported with [`UiEvent::CollapseDone`]
    fn collapse(&mut self, handle: &Self::Handle, speed: Duration) -> Result<(), RenderError>;

    /// Stop any running animation and reset opacity and size
    fn restore(&mut self, handle: &Self::Handle) -> Result<(), RenderError>;

    /// Detach the element
    fn remove(&mut self, handle: &Self::Handle) -> Result<(), RenderError>;

    /// Start reporting hover enter/leave, for the body and the close control
    fn bind_hover(&mut self, handle: &Self::Handle) -> Result<(), RenderError>;

    /// Stop reporting body hover enter/leave
    fn unbind_hover(&mut self, handle: &Self::Handle) -> Result<(), RenderError>;

    fn bind_click(&mut self, handle: &Self::Handle) -> Result<(), RenderError>;

    fn bind_close_click(&mut self, handle: &Self::Handle) -> Result<(), RenderError>;
}

/// Completion and interaction signals flowing from the renderer to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    FadeInDone(NotificationId),
    FadeOutDone(NotificationId),
    CollapseDone(NotificationId),
    ContainerFadedOut,
    HoverEnter(NotificationId),
    HoverLeave(NotificationId),
    CloseHoverEnter(NotificationId),
    CloseHoverLeave(NotificationId),
    Click(NotificationId),
    CloseClick(NotificationId),
}

impl UiEvent {
    pub fn notification_id(&self) -> Option<NotificationId> {
        match *self {
            UiEvent::FadeInDone(id)
            | UiEvent::FadeOutDone(id)
            | UiEvent::CollapseDone(id)
            | UiEvent::HoverEnter(id)
            | UiEvent::HoverLeave(id)
            | UiEvent::CloseHoverEnter(id)
            | UiEvent::CloseHoverLeave(id)
            | UiEvent::Click(id)
            | UiEvent::CloseClick(id) => Some(id),
            UiEvent::ContainerFadedOut => None,
        }
    }
}

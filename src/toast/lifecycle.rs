//! Per-notification lifecycle state machine
//!
//! ```text
//!  Queued ──before_open──▶ Visible ──close──▶ FadingOut ──collapse done──▶ Removed
//!     │                     │  ▲
//!     └─veto─▶ (discarded)  │  └── hover-leave re-arms the timer
//!                           └───── hover-enter cancels the timer
//! ```
//!
//! A [`LiveNotification`] only exists once its record has been rendered, so
//! it starts in `Visible`. It never owns the slot it occupies; releasing the
//! slot is up to the controller once [`LiveNotification::finish`] returns.

use crate::toast::error::RenderError;
use crate::toast::record::{Callbacks, LifecycleState, NotificationId, NotificationRecord};
use crate::toast::renderer::Renderer;
use std::time::Duration;
use tokio::time::Instant;

/// Why a notification starts closing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The fade timer ran out
    Expired,
    /// `Controller::remove` was called
    Programmatic,
    /// The user clicked the close control
    CloseControl,
    /// The user clicked the body of a close-on-click notification
    BodyClick,
    /// The renderer could not keep the notification on screen
    RenderFailure,
}

impl CloseReason {
    /// Manual closes are the ones a user triggered with the pointer
    pub fn is_manual(self) -> bool {
        matches!(self, CloseReason::CloseControl | CloseReason::BodyClick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseStep {
    /// Fade-out started; completion arrives as a UI event
    Animating,
    /// No animation requested; the caller finishes the record now
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClickOutcome {
    Ignored,
    Handled,
    Close,
}

#[derive(Debug)]
pub(crate) struct LiveNotification<H> {
    record: NotificationRecord,
    callbacks: Callbacks,
    handle: H,
    state: LifecycleState,
    deadline: Option<Instant>,
    hovered: bool,
    close_hovered: bool,
    hover_bound: bool,
    shown: bool,
    collapsing: bool,
    manual_close: bool,
}

impl<H: Clone + std::fmt::Debug> LiveNotification<H> {
    pub(crate) fn new(record: NotificationRecord, callbacks: Callbacks, handle: H) -> Self {
        Self {
            record,
            callbacks,
            handle,
            state: LifecycleState::Visible,
            deadline: None,
            hovered: false,
            close_hovered: false,
            hover_bound: false,
            shown: false,
            collapsing: false,
            manual_close: false,
        }
    }

    pub(crate) fn id(&self) -> NotificationId {
        self.record.id()
    }

    pub(crate) fn record(&self) -> &NotificationRecord {
        &self.record
    }

    pub(crate) fn state(&self) -> LifecycleState {
        self.state
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fade in and start listening for pointer events
    pub(crate) fn start<R>(
        &mut self,
        renderer: &mut R,
        fade_in_speed: Duration,
    ) -> Result<(), RenderError>
    where
        R: Renderer<Handle = H>,
    {
        renderer.fade_in(&self.handle, fade_in_speed)?;
        renderer.bind_click(&self.handle)?;
        renderer.bind_close_click(&self.handle)?;
        renderer.bind_hover(&self.handle)?;
        self.hover_bound = true;
        Ok(())
    }

    /// Arm (or re-arm) the single-shot fade timer
    ///
    /// Sticky and hovered notifications keep no timer.
    pub(crate) fn arm_timer(&mut self, duration: Duration, now: Instant) {
        if self.record.is_sticky() || self.hovered || self.state != LifecycleState::Visible {
            return;
        }
        self.deadline = Some(now + duration);
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        self.state == LifecycleState::Visible && self.deadline.is_some_and(|d| d <= now)
    }

    /// Returns true the first time, when `after_open` fires
    pub(crate) fn on_fade_in_done(&mut self) -> bool {
        if self.shown {
            return false;
        }
        self.shown = true;
        self.callbacks.after_open(self.record.id());
        true
    }

    fn accepts_hover(&self) -> bool {
        self.state == LifecycleState::Visible && self.hover_bound && !self.record.is_sticky()
    }

    /// Suspend the timer while the pointer rests on the notification
    pub(crate) fn on_hover_enter<R>(&mut self, renderer: &mut R) -> Result<bool, RenderError>
    where
        R: Renderer<Handle = H>,
    {
        if !self.accepts_hover() {
            return Ok(false);
        }
        self.hovered = true;
        self.deadline = None;
        renderer.restore(&self.handle)?;
        Ok(true)
    }

    /// Arm a fresh full-length timer when the pointer leaves
    pub(crate) fn on_hover_leave(&mut self, duration: Duration, now: Instant) -> bool {
        if !self.accepts_hover() {
            return false;
        }
        self.hovered = false;
        self.arm_timer(duration, now);
        true
    }

    pub(crate) fn on_close_hover(&mut self, entered: bool) {
        self.close_hovered = entered;
    }

    /// Body click; suspended while the pointer is on the close control
    pub(crate) fn on_click(&mut self) -> ClickOutcome {
        if self.state != LifecycleState::Visible || self.close_hovered {
            return ClickOutcome::Ignored;
        }
        self.callbacks.on_click(self.record.id());
        if self.record.closes_on_click() {
            ClickOutcome::Close
        } else {
            ClickOutcome::Handled
        }
    }

    pub(crate) fn accepts_close_click(&self) -> bool {
        self.state == LifecycleState::Visible
    }

    /// `Visible -> FadingOut`
    pub(crate) fn begin_close<R>(
        &mut self,
        renderer: &mut R,
        reason: CloseReason,
        fade: bool,
        speed: Duration,
    ) -> Result<CloseStep, RenderError>
    where
        R: Renderer<Handle = H>,
    {
        debug_assert_eq!(self.state, LifecycleState::Visible);
        let manual_close = reason.is_manual();

        self.deadline = None;
        self.hovered = false;
        self.state = LifecycleState::FadingOut;
        self.manual_close = manual_close;
        self.callbacks.before_close(self.record.id(), manual_close);

        // once closed by hand there is no hovering back
        if manual_close && self.hover_bound {
            self.hover_bound = false;
            if let Err(e) = renderer.unbind_hover(&self.handle) {
                log::warn!("Notification {}: {}", self.record.id(), e);
            }
        }

        if !fade {
            return Ok(CloseStep::Finished);
        }
        renderer.fade_out(&self.handle, speed)?;
        Ok(CloseStep::Animating)
    }

    /// Opacity reached zero; shrink the element next
    pub(crate) fn on_fade_out_done<R>(
        &mut self,
        renderer: &mut R,
        collapse_speed: Duration,
    ) -> Result<bool, RenderError>
    where
        R: Renderer<Handle = H>,
    {
        if self.state != LifecycleState::FadingOut || self.collapsing {
            return Ok(false);
        }
        self.collapsing = true;
        renderer.collapse(&self.handle, collapse_speed)?;
        Ok(true)
    }

    pub(crate) fn on_collapse_done(&self) -> bool {
        self.state == LifecycleState::FadingOut && self.collapsing
    }

    /// `FadingOut -> Removed`: detach and run `after_close`
    ///
    /// Returns the manual-close flag the record closed with.
    pub(crate) fn finish<R>(mut self, renderer: &mut R) -> bool
    where
        R: Renderer<Handle = H>,
    {
        self.detach(renderer);
        self.callbacks.after_close(self.record.id(), self.manual_close);
        self.manual_close
    }

    /// Detach without running any close hook
    pub(crate) fn detach<R>(&mut self, renderer: &mut R)
    where
        R: Renderer<Handle = H>,
    {
        self.deadline = None;
        if let Err(e) = renderer.remove(&self.handle) {
            log::warn!("Notification {}: {}", self.record.id(), e);
        }
    }
}

//! Controller - owner of the queue and every live notification
//!
//! The controller is the only place where lifecycle transitions happen. It is
//! synchronous: the host feeds it requests (`add`, `remove`,
//! `remove_all`), renderer signals ([`UiEvent`]) and the passage of time
//! (`fire_due_timers`), and it answers by driving the renderer and invoking
//! the notification's hooks in a fixed order.
//!
//! # Example
//!
//! ```rust,no_run
//! use toastline::toast::{Controller, NotificationParams, Options, Renderer, UiEvent};
//! # fn demo<R: Renderer>(renderer: R) -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = Controller::new(Options::default(), renderer);
//! let id = controller.add(NotificationParams::new("Saved").title("Editor"))?;
//!
//! // later, when the renderer reports that the fade-in finished
//! controller.handle(UiEvent::FadeInDone(id));
//!
//! // and whenever the clock moves
//! controller.fire_due_timers(tokio::time::Instant::now());
//! # Ok(())
//! # }
//! ```

use crate::core::error_handling::log_notification_failure;
use crate::toast::admission::AdmissionQueue;
use crate::toast::error::{RenderError, ToastResult};
use crate::toast::event::{LifecycleEvent, LifecycleEventType};
use crate::toast::lifecycle::{ClickOutcome, CloseReason, CloseStep, LiveNotification};
use crate::toast::options::{BulkCallback, Options, RemoveAllOptions, RemoveOptions, TimerScope};
use crate::toast::record::{
    LifecycleState, NotificationId, NotificationParams, NotificationRecord, PendingNotification,
};
use crate::toast::renderer::{Renderer, UiEvent};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

/// A `remove_all` whose container fade is still running
struct PendingBulkClose {
    after_close: Option<BulkCallback>,
}

pub struct Controller<R: Renderer> {
    options: Options,
    renderer: R,
    admission: AdmissionQueue,
    live: BTreeMap<NotificationId, LiveNotification<R::Handle>>,
    /// Last custom `time_alive` seen, used with `TimerScope::Shared`
    shared_custom_timer: Option<Duration>,
    bulk_close: Option<PendingBulkClose>,
    events: Vec<LifecycleEvent>,
}

impl<R: Renderer> Controller<R> {
    pub fn new(options: Options, renderer: R) -> Self {
        Self {
            options,
            renderer,
            admission: AdmissionQueue::new(),
            live: BTreeMap::new(),
            shared_custom_timer: None,
            bulk_close: None,
            events: Vec::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options; a larger cap promotes queued notifications at once
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
        self.try_promote();
    }

    pub fn set_max_to_display(&mut self, max_to_display: usize) {
        self.options.max_to_display = max_to_display;
        self.try_promote();
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Validate, enqueue and, if a slot is free, display a notification
    ///
    /// The id is returned as soon as the record is queued; display itself
    /// may happen now or whenever a slot frees up.
    pub fn add(&mut self, params: impl Into<NotificationParams>) -> ToastResult<NotificationId> {
        let draft = params.into().validate(&self.options)?;
        let id = self.admission.enqueue(draft);
        self.emit(LifecycleEventType::Queued, id);
        self.try_promote();
        Ok(id)
    }

    /// Start closing one notification
    ///
    /// Unknown and already removed ids are ignored. A queued notification is
    /// dropped from the queue without running any hook.
    pub fn remove(&mut self, id: NotificationId, options: RemoveOptions) {
        match self.live.get(&id).map(LiveNotification::state) {
            Some(LifecycleState::Visible) => self.close(id, CloseReason::Programmatic, options),
            Some(LifecycleState::FadingOut) if !options.fade => {
                log::debug!("Notification {} removed mid-fade", id);
                self.finish(id);
            }
            Some(state) => log::trace!("Notification {} already {}", id, state),
            None => {
                if self.admission.remove_pending(id).is_some() {
                    log::debug!("Notification {} dropped from queue", id);
                    self.emit(LifecycleEventType::Discarded, id);
                } else {
                    log::trace!("Ignoring remove for unknown notification {}", id);
                }
            }
        }
    }

    /// Take everything down: the queue, every live notification, the container
    pub fn remove_all(&mut self, options: RemoveAllOptions) {
        // records added during an earlier fade stay queued and are dropped below
        self.complete_bulk_close();

        let RemoveAllOptions {
            fade,
            before_close,
            after_close,
        } = options;

        if let Some(before_close) = before_close {
            before_close();
        }

        for id in self.admission.clear_pending() {
            self.emit(LifecycleEventType::Discarded, id);
        }

        let entries: Vec<LiveNotification<R::Handle>> =
            std::mem::take(&mut self.live).into_values().collect();
        self.admission.release_all_slots();
        for entry in &entries {
            self.emit(LifecycleEventType::Removed, entry.id());
        }
        log::debug!("Removing all notifications ({} live)", entries.len());

        let fading = fade
            && self.renderer.container_exists()
            && match self.renderer.fade_out_container(self.options.fade_out_speed) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Container fade failed, removing at once: {}", e);
                    false
                }
            };

        if fading {
            // the container takes its children with it
            self.bulk_close = Some(PendingBulkClose { after_close });
            return;
        }

        for mut entry in entries {
            entry.detach(&mut self.renderer);
        }
        self.remove_container();
        if let Some(after_close) = after_close {
            after_close();
        }
    }

    /// Feed a renderer signal into the state machine
    pub fn handle(&mut self, event: UiEvent) {
        let Some(id) = event.notification_id() else {
            if self.complete_bulk_close() {
                self.try_promote();
            }
            return;
        };
        if !self.live.contains_key(&id) {
            log::trace!("Ignoring {:?} for notification that is not live", event);
            return;
        }

        match event {
            UiEvent::FadeInDone(_) => {
                let shown = self
                    .live
                    .get_mut(&id)
                    .is_some_and(|live| live.on_fade_in_done());
                if shown {
                    self.emit(LifecycleEventType::Shown, id);
                }
            }
            UiEvent::FadeOutDone(_) => {
                let collapse_speed = self.options.collapse_speed;
                if let Some(live) = self.live.get_mut(&id) {
                    if let Err(e) = live.on_fade_out_done(&mut self.renderer, collapse_speed) {
                        self.fail(id, e, "Collapsing notification");
                    }
                }
            }
            UiEvent::CollapseDone(_) => {
                if self.live.get(&id).is_some_and(|live| live.on_collapse_done()) {
                    self.finish(id);
                }
            }
            UiEvent::HoverEnter(_) => {
                if let Some(live) = self.live.get_mut(&id) {
                    match live.on_hover_enter(&mut self.renderer) {
                        Ok(true) => log::trace!("Notification {} hovered, timer suspended", id),
                        Ok(false) => {}
                        Err(e) => {
                            log_notification_failure(&e, id, "Restoring hovered notification");
                            let immediate = RemoveOptions::immediate();
                            self.close(id, CloseReason::RenderFailure, immediate);
                        }
                    }
                }
            }
            UiEvent::HoverLeave(_) => {
                let Some(duration) = self
                    .live
                    .get(&id)
                    .map(|live| self.visible_duration(live.record()))
                else {
                    return;
                };
                if let Some(live) = self.live.get_mut(&id) {
                    if live.on_hover_leave(duration, Instant::now()) {
                        log::trace!("Notification {} left, timer re-armed for {:?}", id, duration);
                    }
                }
            }
            UiEvent::CloseHoverEnter(_) | UiEvent::CloseHoverLeave(_) => {
                let entered = matches!(event, UiEvent::CloseHoverEnter(_));
                if let Some(live) = self.live.get_mut(&id) {
                    live.on_close_hover(entered);
                }
            }
            UiEvent::Click(_) => {
                let outcome = self
                    .live
                    .get_mut(&id)
                    .map_or(ClickOutcome::Ignored, |live| live.on_click());
                if outcome == ClickOutcome::Close {
                    self.close(id, CloseReason::BodyClick, RemoveOptions::default());
                }
            }
            UiEvent::CloseClick(_) => {
                if self.live.get(&id).is_some_and(|live| live.accepts_close_click()) {
                    self.close(id, CloseReason::CloseControl, RemoveOptions::default());
                }
            }
            UiEvent::ContainerFadedOut => {}
        }
    }

    /// Earliest armed fade timer, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.live.values().filter_map(LiveNotification::deadline).min()
    }

    /// Close every notification whose timer expired at or before `now`
    pub fn fire_due_timers(&mut self, now: Instant) -> usize {
        let due: Vec<NotificationId> = self
            .live
            .values()
            .filter(|live| live.is_due(now))
            .map(LiveNotification::id)
            .collect();

        for id in &due {
            log::debug!("Notification {} timed out", id);
            self.close(*id, CloseReason::Expired, RemoveOptions::default());
        }
        due.len()
    }

    /// Promote queued notifications while slots are free
    ///
    /// Held back while a `remove_all` container fade is in flight.
    pub fn try_promote(&mut self) {
        if self.bulk_close.is_some() {
            log::trace!("Promotion held until the container has faded out");
            return;
        }
        while let Some(pending) = self.admission.next_admissible(&self.options) {
            self.open(pending);
        }
    }

    /// `Removed` covers every id that was issued and is no longer queued or live
    pub fn state(&self, id: NotificationId) -> Option<LifecycleState> {
        if let Some(live) = self.live.get(&id) {
            return Some(live.state());
        }
        if self.admission.is_pending(id) {
            return Some(LifecycleState::Queued);
        }
        self.admission.was_issued(id).then_some(LifecycleState::Removed)
    }

    pub fn record(&self, id: NotificationId) -> Option<&NotificationRecord> {
        self.live.get(&id).map(LiveNotification::record)
    }

    /// Visible plus fading notifications
    pub fn visible_count(&self) -> usize {
        self.admission.occupied()
    }

    pub fn pending_count(&self) -> usize {
        self.admission.pending_len()
    }

    pub fn pending_ids(&self) -> Vec<NotificationId> {
        self.admission.pending_ids()
    }

    pub fn live_ids(&self) -> Vec<NotificationId> {
        self.live.keys().copied().collect()
    }

    pub fn is_idle(&self) -> bool {
        self.live.is_empty() && self.admission.pending_len() == 0 && self.bulk_close.is_none()
    }

    /// Take the lifecycle events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }

    fn open(&mut self, pending: PendingNotification) {
        let PendingNotification {
            record,
            mut callbacks,
        } = pending;
        let id = record.id();

        if !callbacks.before_open(id) {
            log::debug!("Notification {} vetoed by before_open", id);
            self.emit(LifecycleEventType::Discarded, id);
            return;
        }

        if !self.renderer.container_exists() {
            if let Err(e) = self.renderer.create_container(&self.options.position) {
                log_notification_failure(&e, id, "Creating notification container");
                self.emit(LifecycleEventType::Discarded, id);
                return;
            }
        }

        let handle = match self.renderer.render(&record) {
            Ok(handle) => handle,
            Err(e) => {
                log_notification_failure(&e, id, "Rendering notification");
                self.emit(LifecycleEventType::Discarded, id);
                self.remove_container_if_empty();
                return;
            }
        };

        self.admission.claim_slot();
        self.emit(LifecycleEventType::Opened, id);

        let mut live = LiveNotification::new(record, callbacks, handle);
        if let Err(e) = live.start(&mut self.renderer, self.options.fade_in_speed) {
            log_notification_failure(&e, id, "Showing notification");
            live.detach(&mut self.renderer);
            self.emit(LifecycleEventType::Removed, id);
            self.admission.release_slot();
            self.remove_container_if_empty();
            return;
        }

        if self.options.timer_scope == TimerScope::Shared {
            self.shared_custom_timer = live.record().time_alive();
        }
        let duration = self.visible_duration(live.record());
        live.arm_timer(duration, Instant::now());

        log::debug!(
            "Notification {} promoted ({} of {} slots)",
            id,
            self.admission.occupied(),
            match self.options.max_to_display {
                0 => "unlimited".to_string(),
                max => max.to_string(),
            }
        );
        self.live.insert(id, live);
    }

    fn visible_duration(&self, record: &NotificationRecord) -> Duration {
        let custom = match self.options.timer_scope {
            TimerScope::PerNotification => record.time_alive(),
            TimerScope::Shared => self.shared_custom_timer,
        };
        custom.unwrap_or(self.options.default_visible_time)
    }

    fn close(&mut self, id: NotificationId, reason: CloseReason, options: RemoveOptions) {
        let speed = options.speed.unwrap_or(self.options.fade_out_speed);
        let Some(live) = self.live.get_mut(&id) else {
            return;
        };

        let step = live.begin_close(&mut self.renderer, reason, options.fade, speed);
        self.events.push(LifecycleEvent::with_manual_close(
            LifecycleEventType::Closing,
            id,
            reason.is_manual(),
        ));
        log::debug!("Notification {} closing ({:?})", id, reason);

        match step {
            Ok(CloseStep::Animating) => {}
            Ok(CloseStep::Finished) => self.finish(id),
            Err(e) => self.fail(id, e, "Fading out notification"),
        }
    }

    /// A renderer failure is fatal to that notification only
    fn fail(&mut self, id: NotificationId, error: RenderError, context: &str) {
        log_notification_failure(&error, id, context);
        self.finish(id);
    }

    fn finish(&mut self, id: NotificationId) {
        let Some(live) = self.live.remove(&id) else {
            return;
        };
        let manual_close = live.finish(&mut self.renderer);
        self.events.push(LifecycleEvent::with_manual_close(
            LifecycleEventType::Removed,
            id,
            manual_close,
        ));
        log::debug!("Notification {} removed", id);
        self.on_slot_freed();
    }

    fn on_slot_freed(&mut self) {
        self.admission.release_slot();
        self.remove_container_if_empty();
        self.try_promote();
    }

    /// Finish a pending bulk removal; false when none was in flight
    fn complete_bulk_close(&mut self) -> bool {
        let Some(bulk) = self.bulk_close.take() else {
            log::trace!("No bulk removal pending");
            return false;
        };
        self.remove_container();
        if let Some(after_close) = bulk.after_close {
            after_close();
        }
        true
    }

    fn remove_container_if_empty(&mut self) {
        if self.live.is_empty() {
            self.remove_container();
        }
    }

    fn remove_container(&mut self) {
        if !self.renderer.container_exists() {
            return;
        }
        if let Err(e) = self.renderer.remove_container() {
            log::warn!("Could not remove notification container: {}", e);
        }
    }

    fn emit(&mut self, event_type: LifecycleEventType, id: NotificationId) {
        self.events.push(LifecycleEvent::new(event_type, id));
    }
}

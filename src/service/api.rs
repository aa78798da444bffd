//! Public API for the notification service
//!
//! [`ToastService`] is a cheap, cloneable handle to a controller running on
//! its own tokio task. Every request travels over a command channel; renderer
//! completions travel back over a second channel through [`UiEventSink`].

use crate::service::runner::{Command, ServiceLoop};
use crate::toast::{
    Controller, LifecycleEvent, NotificationId, NotificationParams, Options, RemoveAllOptions,
    RemoveOptions, Renderer, ToastError, ToastResult, UiEvent,
};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Capacity of the lifecycle event broadcast; slow subscribers see `Lagged`
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Snapshot of the controller's queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// Notifications occupying a slot (visible or fading out)
    pub visible: usize,
    pub pending: usize,
    pub max_to_display: usize,
    /// Nothing queued, nothing live and no bulk removal in flight
    pub idle: bool,
}

impl QueueStats {
    pub(crate) fn of<R: Renderer>(controller: &Controller<R>) -> Self {
        Self {
            visible: controller.visible_count(),
            pending: controller.pending_count(),
            max_to_display: controller.options().max_to_display,
            idle: controller.is_idle(),
        }
    }
}

/// Where a renderer reports finished animations and pointer activity
#[derive(Debug, Clone)]
pub struct UiEventSink {
    sender: mpsc::UnboundedSender<UiEvent>,
}

impl UiEventSink {
    pub(crate) fn new(sender: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self { sender }
    }

    /// Returns `false` once the service has stopped
    pub fn send(&self, event: UiEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    /// Report `event` after `delay`, without blocking the caller
    ///
    /// Must be called from within a tokio runtime.
    pub fn send_after(&self, delay: Duration, event: UiEvent) {
        let sink = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !sink.send(event) {
                log::trace!("Dropped {:?}: service stopped", event);
            }
        });
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[derive(Debug, Clone)]
pub struct ToastService {
    commands: mpsc::UnboundedSender<Command>,
    events: broadcast::Sender<LifecycleEvent>,
    ui_sink: UiEventSink,
}

impl ToastService {
    /// Start a controller on a new tokio task
    ///
    /// `make_renderer` receives the sink through which the renderer must
    /// report completions back to the controller.
    ///
    /// ```rust,no_run
    /// use toastline::render::ConsoleRenderer;
    /// use toastline::service::ToastService;
    /// use toastline::toast::Options;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let service = ToastService::spawn(Options::default(), |sink| {
    ///     ConsoleRenderer::new(std::io::stdout(), sink)
    /// });
    /// let id = service.add("Deploy finished").await?;
    /// service.remove(id, Default::default())?;
    /// service.shutdown().await;
    /// # Ok(())
    /// # }
    /// ```
    pub fn spawn<R, F>(options: Options, make_renderer: F) -> Self
    where
        R: Renderer + Send + 'static,
        R::Handle: Send,
        F: FnOnce(UiEventSink) -> R,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let ui_sink = UiEventSink::new(ui_tx);

        let controller = Controller::new(options, make_renderer(ui_sink.clone()));
        let service_loop = ServiceLoop::new(controller, command_rx, ui_rx, events.clone());
        tokio::spawn(service_loop.run());
        log::debug!("Notification service started");

        Self {
            commands: command_tx,
            events,
            ui_sink,
        }
    }

    /// Queue a notification; resolves with its id once the controller accepted it
    pub async fn add(&self, params: impl Into<NotificationParams>) -> ToastResult<NotificationId> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Add {
            params: params.into(),
            reply,
        })?;
        response.await.map_err(|_| ToastError::ServiceStopped)?
    }

    pub fn remove(&self, id: NotificationId, options: RemoveOptions) -> ToastResult<()> {
        self.send(Command::Remove { id, options })
    }

    pub fn remove_all(&self, options: RemoveAllOptions) -> ToastResult<()> {
        self.send(Command::RemoveAll { options })
    }

    pub fn set_max_to_display(&self, max_to_display: usize) -> ToastResult<()> {
        self.send(Command::SetMaxToDisplay(max_to_display))
    }

    pub async fn stats(&self) -> ToastResult<QueueStats> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Stats { reply })?;
        response.await.map_err(|_| ToastError::ServiceStopped)
    }

    /// Receive every lifecycle event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.events.subscribe()
    }

    pub fn ui_sink(&self) -> UiEventSink {
        self.ui_sink.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    /// Take everything down at once and stop the service task
    ///
    /// Safe to call more than once; later calls return immediately.
    pub async fn shutdown(&self) {
        let (reply, response) = oneshot::channel();
        if self.send(Command::Shutdown { reply }).is_err() {
            return;
        }
        if response.await.is_err() {
            log::trace!("Notification service stopped before acknowledging shutdown");
        }
    }

    fn send(&self, command: Command) -> ToastResult<()> {
        self.commands
            .send(command)
            .map_err(|_| ToastError::ServiceStopped)
    }
}

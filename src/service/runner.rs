//! The task that owns the controller
//!
//! One `select!` loop multiplexes three sources: caller commands, renderer
//! events and the earliest armed fade timer. After every step the lifecycle
//! events the controller recorded are published to subscribers.

use crate::service::api::QueueStats;
use crate::toast::{
    Controller, LifecycleEvent, NotificationId, NotificationParams, RemoveAllOptions,
    RemoveOptions, Renderer, ToastResult, UiEvent,
};
use std::fmt;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{sleep_until, Instant};

pub(crate) enum Command {
    Add {
        params: NotificationParams,
        reply: oneshot::Sender<ToastResult<NotificationId>>,
    },
    Remove {
        id: NotificationId,
        options: RemoveOptions,
    },
    RemoveAll {
        options: RemoveAllOptions,
    },
    SetMaxToDisplay(usize),
    Stats {
        reply: oneshot::Sender<QueueStats>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Add { .. } => write!(f, "Add"),
            Command::Remove { id, options } => write!(f, "Remove({}, {:?})", id, options),
            Command::RemoveAll { options } => write!(f, "RemoveAll({:?})", options),
            Command::SetMaxToDisplay(max) => write!(f, "SetMaxToDisplay({})", max),
            Command::Stats { .. } => write!(f, "Stats"),
            Command::Shutdown { .. } => write!(f, "Shutdown"),
        }
    }
}

pub(crate) struct ServiceLoop<R: Renderer> {
    controller: Controller<R>,
    commands: mpsc::UnboundedReceiver<Command>,
    ui_events: mpsc::UnboundedReceiver<UiEvent>,
    events: broadcast::Sender<LifecycleEvent>,
}

impl<R: Renderer> ServiceLoop<R> {
    pub(crate) fn new(
        controller: Controller<R>,
        commands: mpsc::UnboundedReceiver<Command>,
        ui_events: mpsc::UnboundedReceiver<UiEvent>,
        events: broadcast::Sender<LifecycleEvent>,
    ) -> Self {
        Self {
            controller,
            commands,
            ui_events,
            events,
        }
    }

    pub(crate) async fn run(mut self) {
        loop {
            let deadline = self.controller.next_deadline();

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown { reply }) => {
                        self.stop();
                        let _ = reply.send(());
                        break;
                    }
                    Some(command) => self.apply(command),
                    None => {
                        log::debug!("All service handles dropped");
                        self.stop();
                        break;
                    }
                },

                Some(event) = self.ui_events.recv() => {
                    log::trace!("UI event: {:?}", event);
                    self.controller.handle(event);
                }

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    let fired = self.controller.fire_due_timers(Instant::now());
                    log::trace!("{} fade timer(s) fired", fired);
                }
            }

            self.publish();
        }
        log::debug!("Notification service stopped");
    }

    fn apply(&mut self, command: Command) {
        log::trace!("Command: {:?}", command);
        match command {
            Command::Add { params, reply } => {
                let result = self.controller.add(params);
                if let Err(e) = &result {
                    log::debug!("Rejected notification: {}", e);
                }
                // the caller may have given up waiting; the notification stays
                let _ = reply.send(result);
            }
            Command::Remove { id, options } => self.controller.remove(id, options),
            Command::RemoveAll { options } => self.controller.remove_all(options),
            Command::SetMaxToDisplay(max) => self.controller.set_max_to_display(max),
            Command::Stats { reply } => {
                let _ = reply.send(QueueStats::of(&self.controller));
            }
            Command::Shutdown { .. } => {}
        }
    }

    /// Clear the screen immediately and refuse further commands
    fn stop(&mut self) {
        self.commands.close();
        self.controller.remove_all(RemoveAllOptions::immediate());
        self.publish();
    }

    fn publish(&mut self) {
        for event in self.controller.drain_events() {
            // no subscribers is fine
            let _ = self.events.send(event);
        }
    }
}

//! A renderer that completes every animation after exactly `speed`

use crate::service::{ToastService, UiEventSink};
use crate::toast::{
    LifecycleEventType, NotificationId, NotificationRecord, Options, RenderError, Renderer,
    UiEvent,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

#[derive(Debug)]
pub struct SimulatedRenderer {
    sink: UiEventSink,
    container: bool,
    pub rendered: Arc<Mutex<Vec<NotificationId>>>,
}

impl SimulatedRenderer {
    pub fn new(sink: UiEventSink, rendered: Arc<Mutex<Vec<NotificationId>>>) -> Self {
        Self {
            sink,
            container: false,
            rendered,
        }
    }
}

impl Renderer for SimulatedRenderer {
    type Handle = NotificationId;

    fn container_exists(&self) -> bool {
        self.container
    }

    fn create_container(&mut self, _position: &str) -> Result<(), RenderError> {
        self.container = true;
        Ok(())
    }

    fn remove_container(&mut self) -> Result<(), RenderError> {
        self.container = false;
        Ok(())
    }

    fn fade_out_container(&mut self, speed: Duration) -> Result<(), RenderError> {
        self.sink.send_after(speed, UiEvent::ContainerFadedOut);
        Ok(())
    }

    fn render(&mut self, record: &NotificationRecord) -> Result<NotificationId, RenderError> {
        self.rendered.lock().unwrap().push(record.id());
        Ok(record.id())
    }

    fn fade_in(&mut self, id: &NotificationId, speed: Duration) -> Result<(), RenderError> {
        self.sink.send_after(speed, UiEvent::FadeInDone(*id));
        Ok(())
    }

    fn fade_out(&mut self, id: &NotificationId, speed: Duration) -> Result<(), RenderError> {
        self.sink.send_after(speed, UiEvent::FadeOutDone(*id));
        Ok(())
    }

    fn collapse(&mut self, id: &NotificationId, speed: Duration) -> Result<(), RenderError> {
        self.sink.send_after(speed, UiEvent::CollapseDone(*id));
        Ok(())
    }

    fn restore(&mut self, _id: &NotificationId) -> Result<(), RenderError> {
        Ok(())
    }

    fn remove(&mut self, _id: &NotificationId) -> Result<(), RenderError> {
        Ok(())
    }

    fn bind_hover(&mut self, _id: &NotificationId) -> Result<(), RenderError> {
        Ok(())
    }

    fn unbind_hover(&mut self, _id: &NotificationId) -> Result<(), RenderError> {
        Ok(())
    }

    fn bind_click(&mut self, _id: &NotificationId) -> Result<(), RenderError> {
        Ok(())
    }

    fn bind_close_click(&mut self, _id: &NotificationId) -> Result<(), RenderError> {
        Ok(())
    }
}

pub struct Harness {
    pub service: ToastService,
    pub events: broadcast::Receiver<crate::toast::LifecycleEvent>,
    pub rendered: Arc<Mutex<Vec<NotificationId>>>,
}

impl Harness {
    pub fn start(options: Options) -> Self {
        let rendered = Arc::new(Mutex::new(Vec::new()));
        let for_renderer = Arc::clone(&rendered);
        let service =
            ToastService::spawn(options, move |sink| SimulatedRenderer::new(sink, for_renderer));
        let events = service.subscribe();
        Self {
            service,
            events,
            rendered,
        }
    }

    /// Every event published so far, as `(id, type)` pairs
    pub fn drain(&mut self) -> Vec<(u64, LifecycleEventType)> {
        let mut seen = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            seen.push((event.id.get(), event.event_type));
        }
        seen
    }

    pub fn rendered(&self) -> Vec<NotificationId> {
        self.rendered.lock().unwrap().clone()
    }
}

pub async fn advance(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

//! Shared fixtures: a renderer that records every call, and a hook journal

use crate::toast::{
    Controller, NotificationId, NotificationParams, NotificationRecord, Options, RenderError,
    Renderer, UiEvent,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateContainer(String),
    RemoveContainer,
    FadeOutContainer(Duration),
    Render(NotificationId),
    FadeIn(NotificationId, Duration),
    FadeOut(NotificationId, Duration),
    Collapse(NotificationId, Duration),
    Restore(NotificationId),
    Remove(NotificationId),
    BindHover(NotificationId),
    UnbindHover(NotificationId),
    BindClick(NotificationId),
    BindCloseClick(NotificationId),
}

/// Renderer double; operations listed in `failing` return an error
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
    pub failing: HashSet<&'static str>,
    container: bool,
}

impl RecordingRenderer {
    pub fn failing_on(operation: &'static str) -> Self {
        Self {
            failing: HashSet::from([operation]),
            ..Self::default()
        }
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn has(&self, call: &Call) -> bool {
        self.calls.contains(call)
    }

    fn record(&mut self, operation: &'static str, call: Call) -> Result<(), RenderError> {
        self.calls.push(call);
        if self.failing.contains(operation) {
            return Err(RenderError::new(operation, "injected failure"));
        }
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    type Handle = NotificationId;

    fn container_exists(&self) -> bool {
        self.container
    }

    fn create_container(&mut self, position: &str) -> Result<(), RenderError> {
        self.record("create_container", Call::CreateContainer(position.to_string()))?;
        self.container = true;
        Ok(())
    }

    fn remove_container(&mut self) -> Result<(), RenderError> {
        self.container = false;
        self.record("remove_container", Call::RemoveContainer)
    }

    fn fade_out_container(&mut self, speed: Duration) -> Result<(), RenderError> {
        self.record("fade_out_container", Call::FadeOutContainer(speed))
    }

    fn render(&mut self, record: &NotificationRecord) -> Result<NotificationId, RenderError> {
        self.record("render", Call::Render(record.id()))?;
        Ok(record.id())
    }

    fn fade_in(&mut self, handle: &NotificationId, speed: Duration) -> Result<(), RenderError> {
        self.record("fade_in", Call::FadeIn(*handle, speed))
    }

    fn fade_out(&mut self, handle: &NotificationId, speed: Duration) -> Result<(), RenderError> {
        self.record("fade_out", Call::FadeOut(*handle, speed))
    }

    fn collapse(&mut self, handle: &NotificationId, speed: Duration) -> Result<(), RenderError> {
        self.record("collapse", Call::Collapse(*handle, speed))
    }

    fn restore(&mut self, handle: &NotificationId) -> Result<(), RenderError> {
        self.record("restore", Call::Restore(*handle))
    }

    fn remove(&mut self, handle: &NotificationId) -> Result<(), RenderError> {
        self.record("remove", Call::Remove(*handle))
    }

    fn bind_hover(&mut self, handle: &NotificationId) -> Result<(), RenderError> {
        self.record("bind_hover", Call::BindHover(*handle))
    }

    fn unbind_hover(&mut self, handle: &NotificationId) -> Result<(), RenderError> {
        self.record("unbind_hover", Call::UnbindHover(*handle))
    }

    fn bind_click(&mut self, handle: &NotificationId) -> Result<(), RenderError> {
        self.record("bind_click", Call::BindClick(*handle))
    }

    fn bind_close_click(&mut self, handle: &NotificationId) -> Result<(), RenderError> {
        self.record("bind_close_click", Call::BindCloseClick(*handle))
    }
}

pub type TestController = Controller<RecordingRenderer>;

pub fn controller() -> TestController {
    Controller::new(Options::default(), RecordingRenderer::default())
}

pub fn capped(max_to_display: usize) -> TestController {
    Controller::new(
        Options {
            max_to_display,
            ..Options::default()
        },
        RecordingRenderer::default(),
    )
}

/// Ordered log of hook invocations, e.g. `"before_close:3:manual"`
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.0.lock().unwrap().iter().any(|e| e == entry)
    }

    /// Attach every per-notification hook to `params`, logging into this journal
    pub fn hooks(&self, params: NotificationParams) -> NotificationParams {
        let (a, b, c, d, e) = (
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        );
        params
            .before_open(move |id| {
                a.push(format!("before_open:{id}"));
                true
            })
            .after_open(move |id| b.push(format!("after_open:{id}")))
            .before_close(move |id, manual| c.push(format!("before_close:{id}:{}", flag(manual))))
            .after_close(move |id, manual| d.push(format!("after_close:{id}:{}", flag(manual))))
            .on_click(move |id| e.push(format!("click:{id}")))
    }
}

fn flag(manual: bool) -> &'static str {
    if manual {
        "manual"
    } else {
        "auto"
    }
}

/// Drive a closing notification through both animation completions
pub fn complete_close(controller: &mut TestController, id: NotificationId) {
    controller.handle(UiEvent::FadeOutDone(id));
    controller.handle(UiEvent::CollapseDone(id));
}

pub fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(3600)
}

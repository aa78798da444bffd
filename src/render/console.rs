//! Terminal renderer
//!
//! A terminal has no opacity and no pointer, so the renderer prints one line
//! when a notification appears and one when it is dismissed. Animations are
//! simulated: each one completes after its configured speed, reported through
//! the [`UiEventSink`].

use crate::core::styles::StyleRole;
use crate::service::UiEventSink;
use crate::toast::{NotificationId, NotificationRecord, RenderError, Renderer, UiEvent};
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

/// What the console needs to know about a rendered notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleHandle {
    pub id: NotificationId,
    title: Option<String>,
    text: String,
    image: Option<String>,
    sticky: bool,
}

impl ConsoleHandle {
    fn from_record(record: &NotificationRecord) -> Self {
        Self {
            id: record.id(),
            title: record.title().map(str::to_string),
            text: record.text().to_string(),
            image: record.image().map(str::to_string),
            sticky: record.is_sticky(),
        }
    }

    fn shown_line(&self, color: bool) -> String {
        let mut line = format!("[{}] ", self.id);
        if let Some(title) = &self.title {
            line.push_str(&StyleRole::Title.paint(title, color));
            line.push_str(": ");
        }
        line.push_str(&StyleRole::Body.paint(&self.text, color));
        if let Some(image) = &self.image {
            line.push(' ');
            line.push_str(&StyleRole::Image.paint(&format!("<{}>", image), color));
        }
        if self.sticky {
            line.push(' ');
            line.push_str(&StyleRole::Sticky.paint("(sticky)", color));
        }
        line
    }

    fn dismissed_line(&self, color: bool) -> String {
        let label = self.title.as_deref().unwrap_or(&self.text);
        StyleRole::Dismissed.paint(&format!("[{}] dismissed: {}", self.id, label), color)
    }
}

pub struct ConsoleRenderer<W: Write> {
    out: W,
    sink: UiEventSink,
    color: bool,
    position: Option<String>,
    /// Printed and not yet dismissed
    on_screen: BTreeMap<NotificationId, ConsoleHandle>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, sink: UiEventSink) -> Self {
        Self {
            out,
            sink,
            color: false,
            position: None,
            on_screen: BTreeMap::new(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    fn write_line(&mut self, operation: &'static str, line: &str) -> Result<(), RenderError> {
        writeln!(self.out, "{}", line)
            .and_then(|_| self.out.flush())
            .map_err(|e| RenderError::new(operation, e.to_string()))
    }

    fn complete_after(&self, speed: Duration, event: UiEvent) {
        self.sink.send_after(speed, event);
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    type Handle = ConsoleHandle;

    fn container_exists(&self) -> bool {
        self.position.is_some()
    }

    fn create_container(&mut self, position: &str) -> Result<(), RenderError> {
        log::trace!("Console container opened at {}", position);
        self.position = Some(position.to_string());
        Ok(())
    }

    fn remove_container(&mut self) -> Result<(), RenderError> {
        log::trace!("Console container closed");
        self.position = None;
        for handle in std::mem::take(&mut self.on_screen).into_values() {
            let line = handle.dismissed_line(self.color);
            self.write_line("remove_container", &line)?;
        }
        Ok(())
    }

    fn fade_out_container(&mut self, speed: Duration) -> Result<(), RenderError> {
        self.complete_after(speed, UiEvent::ContainerFadedOut);
        Ok(())
    }

    fn render(&mut self, record: &NotificationRecord) -> Result<ConsoleHandle, RenderError> {
        if !record.class_name().is_empty() {
            log::trace!("Notification {} styled as '{}'", record.id(), record.class_name());
        }
        Ok(ConsoleHandle::from_record(record))
    }

    fn fade_in(&mut self, handle: &ConsoleHandle, speed: Duration) -> Result<(), RenderError> {
        let line = handle.shown_line(self.color);
        self.write_line("fade_in", &line)?;
        self.on_screen.insert(handle.id, handle.clone());
        self.complete_after(speed, UiEvent::FadeInDone(handle.id));
        Ok(())
    }

    fn fade_out(&mut self, handle: &ConsoleHandle, speed: Duration) -> Result<(), RenderError> {
        self.complete_after(speed, UiEvent::FadeOutDone(handle.id));
        Ok(())
    }

    fn collapse(&mut self, handle: &ConsoleHandle, speed: Duration) -> Result<(), RenderError> {
        self.complete_after(speed, UiEvent::CollapseDone(handle.id));
        Ok(())
    }

    fn restore(&mut self, _handle: &ConsoleHandle) -> Result<(), RenderError> {
        Ok(())
    }

    fn remove(&mut self, handle: &ConsoleHandle) -> Result<(), RenderError> {
        self.on_screen.remove(&handle.id);
        let line = handle.dismissed_line(self.color);
        self.write_line("remove", &line)
    }

    fn bind_hover(&mut self, _handle: &ConsoleHandle) -> Result<(), RenderError> {
        Ok(())
    }

    fn unbind_hover(&mut self, _handle: &ConsoleHandle) -> Result<(), RenderError> {
        Ok(())
    }

    fn bind_click(&mut self, _handle: &ConsoleHandle) -> Result<(), RenderError> {
        Ok(())
    }

    fn bind_close_click(&mut self, _handle: &ConsoleHandle) -> Result<(), RenderError> {
        Ok(())
    }
}

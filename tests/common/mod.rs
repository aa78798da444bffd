//! Common test utilities and helpers

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use toastline::render::ConsoleRenderer;
use toastline::service::ToastService;
use toastline::toast::{LifecycleEvent, Options};
use tokio::sync::broadcast;

/// A `Write` target the test can read back while the service writes to it
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A console-backed service plus its output and an event subscription
pub struct ConsoleFixture {
    pub service: ToastService,
    pub output: SharedBuffer,
    pub events: broadcast::Receiver<LifecycleEvent>,
}

impl ConsoleFixture {
    pub fn start(options: Options) -> Self {
        let output = SharedBuffer::default();
        let writer = output.clone();
        let service = ToastService::spawn(options, move |sink| ConsoleRenderer::new(writer, sink));
        let events = service.subscribe();
        Self {
            service,
            output,
            events,
        }
    }

    pub fn drain(&mut self) -> Vec<LifecycleEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}

/// Sleep on the paused test clock
pub async fn advance(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

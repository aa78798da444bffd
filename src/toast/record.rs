//! Notification records and the requests that produce them

use crate::core::validation::{require_text, ValidationError};
use crate::toast::options::Options;
use std::fmt;
use std::time::Duration;
use strum_macros::Display;

/// Process-unique notification identifier, assigned at enqueue time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LifecycleState {
    Queued,
    Visible,
    FadingOut,
    Removed,
}

pub type BeforeOpenFn = Box<dyn FnMut(NotificationId) -> bool + Send>;
pub type OpenFn = Box<dyn FnMut(NotificationId) + Send>;
pub type CloseFn = Box<dyn FnMut(NotificationId, bool) + Send>;

/// Lifecycle hooks of a single notification; each one defaults to a no-op
#[derive(Default)]
pub struct Callbacks {
    before_open: Option<BeforeOpenFn>,
    after_open: Option<OpenFn>,
    before_close: Option<CloseFn>,
    after_close: Option<CloseFn>,
    on_click: Option<OpenFn>,
}

impl Callbacks {
    /// Returns `false` when the hook vetoes the display
    pub(crate) fn before_open(&mut self, id: NotificationId) -> bool {
        self.before_open.as_mut().map_or(true, |f| f(id))
    }

    pub(crate) fn after_open(&mut self, id: NotificationId) {
        if let Some(f) = self.after_open.as_mut() {
            f(id);
        }
    }

    pub(crate) fn before_close(&mut self, id: NotificationId, manual_close: bool) {
        if let Some(f) = self.before_close.as_mut() {
            f(id, manual_close);
        }
    }

    pub(crate) fn after_close(&mut self, id: NotificationId, manual_close: bool) {
        if let Some(f) = self.after_close.as_mut() {
            f(id, manual_close);
        }
    }

    pub(crate) fn on_click(&mut self, id: NotificationId) {
        if let Some(f) = self.on_click.as_mut() {
            f(id);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("before_open", &self.before_open.is_some())
            .field("after_open", &self.after_open.is_some())
            .field("before_close", &self.before_close.is_some())
            .field("after_close", &self.after_close.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

/// An `add` request as the caller builds it
///
/// ```
/// use std::time::Duration;
/// use toastline::toast::NotificationParams;
///
/// let params = NotificationParams::new("Build finished")
///     .title("CI")
///     .time_alive(Duration::from_secs(2))
///     .on_click(|id| println!("clicked {id}"));
/// # let _ = params;
/// ```
#[derive(Debug, Default)]
pub struct NotificationParams {
    pub title: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub sticky: bool,
    pub time_alive: Option<Duration>,
    pub class_name: Option<String>,
    pub close_on_click: Option<bool>,
    pub callbacks: Callbacks,
}

impl NotificationParams {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn time_alive(mut self, time_alive: Duration) -> Self {
        self.time_alive = Some(time_alive);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn close_on_click(mut self, close_on_click: bool) -> Self {
        self.close_on_click = Some(close_on_click);
        self
    }

    pub fn before_open(mut self, f: impl FnMut(NotificationId) -> bool + Send + 'static) -> Self {
        self.callbacks.before_open = Some(Box::new(f));
        self
    }

    pub fn after_open(mut self, f: impl FnMut(NotificationId) + Send + 'static) -> Self {
        self.callbacks.after_open = Some(Box::new(f));
        self
    }

    pub fn before_close(mut self, f: impl FnMut(NotificationId, bool) + Send + 'static) -> Self {
        self.callbacks.before_close = Some(Box::new(f));
        self
    }

    pub fn after_close(mut self, f: impl FnMut(NotificationId, bool) + Send + 'static) -> Self {
        self.callbacks.after_close = Some(Box::new(f));
        self
    }

    pub fn on_click(mut self, f: impl FnMut(NotificationId) + Send + 'static) -> Self {
        self.callbacks.on_click = Some(Box::new(f));
        self
    }

    /// Check the request and resolve per-call overrides against `options`
    pub(crate) fn validate(self, options: &Options) -> Result<Draft, ValidationError> {
        let text = require_text(self.text)?;
        Ok(Draft {
            title: self.title.filter(|t| !t.is_empty()),
            text,
            image: self.image.filter(|i| !i.is_empty()),
            sticky: self.sticky,
            time_alive: self.time_alive.filter(|d| !d.is_zero()),
            class_name: self
                .class_name
                .unwrap_or_else(|| options.class_name.clone()),
            close_on_click: self.close_on_click.unwrap_or(options.close_on_click),
            callbacks: self.callbacks,
        })
    }
}

impl From<&str> for NotificationParams {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for NotificationParams {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A validated request still waiting for its id
#[derive(Debug)]
pub(crate) struct Draft {
    title: Option<String>,
    text: String,
    image: Option<String>,
    sticky: bool,
    time_alive: Option<Duration>,
    class_name: String,
    close_on_click: bool,
    callbacks: Callbacks,
}

impl Draft {
    pub(crate) fn into_pending(self, id: NotificationId) -> PendingNotification {
        PendingNotification {
            record: NotificationRecord {
                id,
                title: self.title,
                text: self.text,
                image: self.image,
                sticky: self.sticky,
                time_alive: self.time_alive,
                class_name: self.class_name,
                close_on_click: self.close_on_click,
            },
            callbacks: self.callbacks,
        }
    }
}

/// Immutable description of one notification
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    id: NotificationId,
    title: Option<String>,
    text: String,
    image: Option<String>,
    sticky: bool,
    time_alive: Option<Duration>,
    class_name: String,
    close_on_click: bool,
}

impl NotificationRecord {
    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Layout hint for renderers that place an image next to the text
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn time_alive(&self) -> Option<Duration> {
        self.time_alive
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn closes_on_click(&self) -> bool {
        self.close_on_click
    }
}

/// A record waiting in the admission queue, together with its hooks
#[derive(Debug)]
pub struct PendingNotification {
    pub(crate) record: NotificationRecord,
    pub(crate) callbacks: Callbacks,
}

impl PendingNotification {
    pub fn id(&self) -> NotificationId {
        self.record.id
    }

    pub fn record(&self) -> &NotificationRecord {
        &self.record
    }
}

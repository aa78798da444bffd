//! Global display options and per-call removal options

use std::fmt;
use std::time::Duration;
use strum_macros::{Display, EnumString};

pub const DEFAULT_POSITION: &str = "top-right";
pub const DEFAULT_FADE_IN_SPEED: Duration = Duration::from_millis(400);
pub const DEFAULT_FADE_OUT_SPEED: Duration = Duration::from_millis(1000);
pub const DEFAULT_VISIBLE_TIME: Duration = Duration::from_millis(6000);
pub const DEFAULT_COLLAPSE_SPEED: Duration = Duration::from_millis(300);

/// Named animation speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Speed {
    Slow,
    #[strum(serialize = "medium", serialize = "normal")]
    Medium,
    Fast,
}

impl Speed {
    pub fn duration(self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(600),
            Speed::Medium => Duration::from_millis(400),
            Speed::Fast => Duration::from_millis(200),
        }
    }
}

/// Parse a speed given as milliseconds (`"250"`) or by name (`"fast"`)
pub fn parse_speed(value: &str) -> Option<Duration> {
    let value = value.trim();
    if let Ok(millis) = value.parse::<u64>() {
        return Some(Duration::from_millis(millis));
    }
    value.parse::<Speed>().ok().map(Speed::duration)
}

/// Where the visible duration of a notification comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum TimerScope {
    /// Each notification uses its own `time_alive`, else the global default
    #[default]
    PerNotification,
    /// The `time_alive` of the most recently opened notification applies to
    /// every timer armed afterwards, until another opening replaces it
    Shared,
}

/// Controller-wide settings
///
/// Read at the moment they are needed: changing `max_to_display` between two
/// promotions takes effect on the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub position: String,
    pub class_name: String,
    pub fade_in_speed: Duration,
    pub fade_out_speed: Duration,
    pub default_visible_time: Duration,
    pub collapse_speed: Duration,
    /// 0 means unlimited
    pub max_to_display: usize,
    pub close_on_click: bool,
    pub timer_scope: TimerScope,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION.to_string(),
            class_name: String::new(),
            fade_in_speed: DEFAULT_FADE_IN_SPEED,
            fade_out_speed: DEFAULT_FADE_OUT_SPEED,
            default_visible_time: DEFAULT_VISIBLE_TIME,
            collapse_speed: DEFAULT_COLLAPSE_SPEED,
            max_to_display: 0,
            close_on_click: false,
            timer_scope: TimerScope::PerNotification,
        }
    }
}

impl Options {
    /// Whether another notification may become visible with `occupied` slots in use
    pub fn has_room_for_another(&self, occupied: usize) -> bool {
        self.max_to_display == 0 || occupied < self.max_to_display
    }
}

/// How a single notification should be taken off screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Animate out; `false` detaches the element at once
    pub fade: bool,
    /// Overrides `Options::fade_out_speed` for this removal
    pub speed: Option<Duration>,
}

impl Default for RemoveOptions {
    fn default() -> Self {
        Self {
            fade: true,
            speed: None,
        }
    }
}

impl RemoveOptions {
    pub fn immediate() -> Self {
        Self {
            fade: false,
            speed: None,
        }
    }

    pub fn with_speed(speed: Duration) -> Self {
        Self {
            fade: true,
            speed: Some(speed),
        }
    }
}

pub type BulkCallback = Box<dyn FnOnce() + Send>;

/// Callbacks bracketing a `remove_all`
pub struct RemoveAllOptions {
    pub fade: bool,
    pub before_close: Option<BulkCallback>,
    pub after_close: Option<BulkCallback>,
}

impl Default for RemoveAllOptions {
    fn default() -> Self {
        Self {
            fade: true,
            before_close: None,
            after_close: None,
        }
    }
}

impl RemoveAllOptions {
    pub fn immediate() -> Self {
        Self {
            fade: false,
            ..Self::default()
        }
    }

    pub fn before_close(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.before_close = Some(Box::new(f));
        self
    }

    pub fn after_close(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.after_close = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for RemoveAllOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoveAllOptions")
            .field("fade", &self.fade)
            .field("before_close", &self.before_close.is_some())
            .field("after_close", &self.after_close.is_some())
            .finish()
    }
}

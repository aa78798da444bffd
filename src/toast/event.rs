//! Lifecycle events emitted by the controller

use crate::toast::record::NotificationId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleEventType {
    /// Accepted and waiting for a slot
    Queued,
    /// Rendered and fading in; occupies a slot
    Opened,
    /// Fade-in finished
    Shown,
    /// Fade-out started
    Closing,
    /// Detached; the slot is free again
    Removed,
    /// Never displayed: vetoed by `before_open`, failed to render, or dropped from the queue
    Discarded,
}

impl LifecycleEventType {
    /// True for the two terminal event kinds
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LifecycleEventType::Removed | LifecycleEventType::Discarded
        )
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LifecycleEvent {
    pub id: NotificationId,
    pub event_type: LifecycleEventType,
    /// Only meaningful for `Closing` and `Removed`
    pub manual_close: bool,
    pub timestamp: DateTime<Utc>,
}

impl LifecycleEvent {
    pub fn new(event_type: LifecycleEventType, id: NotificationId) -> Self {
        Self {
            id,
            event_type,
            manual_close: false,
            timestamp: Utc::now(),
        }
    }

    pub fn with_manual_close(
        event_type: LifecycleEventType,
        id: NotificationId,
        manual_close: bool,
    ) -> Self {
        Self {
            manual_close,
            ..Self::new(event_type, id)
        }
    }

    /// One-line JSON rendering for `--events` output
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!("{{\"id\":{},\"event_type\":\"{}\"}}", self.id, self.event_type)
        })
    }
}

//! Admission control for the notification queue
//!
//! Pending notifications wait here in strict FIFO order until the controller
//! has room to show them. The queue also owns the two counters every
//! transition touches: the id sequence and the number of occupied slots
//! (records that are visible or fading out).

use crate::toast::options::Options;
use crate::toast::record::{Draft, NotificationId, PendingNotification};
use std::collections::VecDeque;

#[derive(Debug)]
pub struct AdmissionQueue {
    /// Next id to hand out; starts at 1 and only moves forward
    next_id: u64,
    pending: VecDeque<PendingNotification>,
    occupied: usize,
}

impl Default for AdmissionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl AdmissionQueue {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: VecDeque::new(),
            occupied: 0,
        }
    }

    /// Assign the next id and append to the back of the queue
    pub(crate) fn enqueue(&mut self, draft: Draft) -> NotificationId {
        let id = NotificationId::new(self.next_id);
        self.next_id += 1;
        self.pending.push_back(draft.into_pending(id));
        log::debug!(
            "Notification {} queued ({} pending, {} occupied)",
            id,
            self.pending.len(),
            self.occupied
        );
        id
    }

    pub fn has_capacity(&self, options: &Options) -> bool {
        options.has_room_for_another(self.occupied)
    }

    /// Pop the front-most pending record if a slot is free
    ///
    /// The cap is read from `options` on every call.
    pub fn next_admissible(&mut self, options: &Options) -> Option<PendingNotification> {
        if !self.has_capacity(options) {
            return None;
        }
        self.pending.pop_front()
    }

    pub fn claim_slot(&mut self) {
        self.occupied += 1;
    }

    pub fn release_slot(&mut self) {
        debug_assert!(self.occupied > 0, "slot released twice");
        self.occupied = self.occupied.saturating_sub(1);
    }

    pub fn release_all_slots(&mut self) {
        self.occupied = 0;
    }

    pub fn remove_pending(&mut self, id: NotificationId) -> Option<PendingNotification> {
        let position = self.pending.iter().position(|p| p.id() == id)?;
        self.pending.remove(position)
    }

    /// Drop every pending record, returning the ids in queue order
    pub fn clear_pending(&mut self) -> Vec<NotificationId> {
        self.pending.drain(..).map(|p| p.id()).collect()
    }

    pub fn is_pending(&self, id: NotificationId) -> bool {
        self.pending.iter().any(|p| p.id() == id)
    }

    /// True for any id this queue has handed out
    pub fn was_issued(&self, id: NotificationId) -> bool {
        id.get() >= 1 && id.get() < self.next_id
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_ids(&self) -> Vec<NotificationId> {
        self.pending.iter().map(|p| p.id()).collect()
    }

    pub fn occupied(&self) -> usize {
        self.occupied
    }
}

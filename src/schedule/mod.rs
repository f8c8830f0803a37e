//! Virtual-time timers
//!
//! A [`TimerQueue`] holds events due at a point on its own timeline. Time
//! only moves when the owner advances it, so timer-driven state can be
//! tested without waiting on a wall clock.

use std::collections::BTreeMap;
use std::time::Duration;

/// Identifies one scheduled event so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle {
    due: Duration,
    seq: u64,
}

impl TimerHandle {
    pub fn due(&self) -> Duration {
        self.due
    }
}

/// Events ordered by due time, then by scheduling order
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<TimerHandle, E>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position on the timeline
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `event` to fire `delay` after now
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle {
            due: self.now + delay,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(handle, event);
        handle
    }

    /// Cancel a pending event, returning it if it had not fired yet
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<E> {
        self.pending.remove(&handle)
    }

    /// Pop the earliest event due at or before `until`, moving the clock to
    /// its due time. Events scheduled while handling it are relative to
    /// that time.
    pub fn pop_due(&mut self, until: Duration) -> Option<E> {
        let handle = *self.pending.keys().next()?;
        if handle.due > until {
            return None;
        }
        self.now = self.now.max(handle.due);
        self.pending.remove(&handle)
    }

    /// Move the clock forward to `until` once no more events are due
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Drop every pending event
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

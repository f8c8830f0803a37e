//! Toast queue
//!
//! Outcome notifications that stay visible for a fixed window, then hide
//! and are removed after a short exit delay. Each entry moves through
//! `visible -> hidden -> removed` and never back.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::conversion::ConverterConfig;
use crate::schedule::{TimerHandle, TimerQueue};

/// Unique, never reused identifier of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy)]
enum ToastTimer {
    Hide(ToastId),
    Remove(ToastId),
}

/// Insertion-ordered queue of live toasts
#[derive(Debug, Clone)]
pub struct ToastQueue {
    entries: Vec<Toast>,
    next_id: u64,
    announced: u64,
    timers: TimerQueue<ToastTimer>,
    hide_timers: HashMap<ToastId, TimerHandle>,
    visible_for: Duration,
    exit_delay: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(4000), Duration::from_millis(300))
    }
}

impl ToastQueue {
    pub fn new(visible_for: Duration, exit_delay: Duration) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            announced: 0,
            timers: TimerQueue::new(),
            hide_timers: HashMap::new(),
            visible_for,
            exit_delay,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.toast_visible, config.toast_exit)
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let message = message.into();
        match kind {
            ToastKind::Success => tracing::debug!(toast = %id, %message, "success toast"),
            ToastKind::Error => tracing::warn!(toast = %id, %message, "error toast"),
        }

        self.entries.push(Toast {
            id,
            message,
            kind,
            visible: true,
        });
        let handle = self.timers.schedule(self.visible_for, ToastTimer::Hide(id));
        self.hide_timers.insert(id, handle);
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> ToastId {
        self.push(message, ToastKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> ToastId {
        self.push(message, ToastKind::Error)
    }

    /// Hide a toast now; it is still removed only after the exit delay
    pub fn dismiss(&mut self, id: ToastId) {
        if let Some(handle) = self.hide_timers.remove(&id) {
            self.timers.cancel(handle);
        }
        self.hide(id);
    }

    /// Drop every toast; timers already scheduled will not fire
    pub fn clear(&mut self) {
        self.entries.clear();
        self.timers.clear();
        self.hide_timers.clear();
        self.announced = self.next_id - 1;
    }

    /// Move time forward, applying every hide/remove that falls due
    pub fn advance(&mut self, by: Duration) {
        let until = self.timers.now() + by;
        while let Some(timer) = self.timers.pop_due(until) {
            match timer {
                ToastTimer::Hide(id) => {
                    self.hide_timers.remove(&id);
                    self.hide(id);
                }
                ToastTimer::Remove(id) => self.entries.retain(|toast| toast.id != id),
            }
        }
        self.timers.settle(until);
    }

    fn hide(&mut self, id: ToastId) {
        let Some(toast) = self.entries.iter_mut().find(|toast| toast.id == id) else {
            return;
        };
        if !toast.visible {
            return;
        }
        toast.visible = false;
        self.timers.schedule(self.exit_delay, ToastTimer::Remove(id));
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.entries
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.entries.iter().find(|toast| toast.id == id)
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Toasts pushed since the previous call, oldest first
    pub fn drain_new(&mut self) -> Vec<Toast> {
        let since = self.announced;
        self.announced = self.next_id - 1;
        self.entries
            .iter()
            .filter(|toast| toast.id.0 > since)
            .cloned()
            .collect()
    }
}

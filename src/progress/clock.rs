use std::time::{Duration, Instant};

/// Source of time and cooperative waits
pub trait Clock {
    /// Time elapsed since the clock was created
    fn now(&self) -> Duration;

    /// Wait for `duration` before returning
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock; `sleep` blocks the current thread
#[derive(Debug, Clone)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Virtual clock; `sleep` returns immediately and advances `now`
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    elapsed: Duration,
    sleeps: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `sleep` calls made so far
    pub fn sleeps(&self) -> usize {
        self.sleeps
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed
    }

    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.sleeps += 1;
    }
}

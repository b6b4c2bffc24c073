use std::time::{Duration, Instant};

/// counts down from a set duration and reports finishing exactly once
///
/// same caller-supplied-clock convention as the stopwatch
#[derive(Debug, Default, Clone, Copy)]
pub struct CountdownTimer {
    remaining: Duration,
    started: Option<Instant>,
}

impl CountdownTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// begin a fresh countdown of `total`
    pub fn start(&mut self, total: Duration, now: Instant) {
        self.remaining = total;
        self.started = Some(now);
    }

    /// pause, keeping whatever time is left
    pub fn stop(&mut self, now: Instant) {
        self.remaining = self.remaining(now);
        self.started = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// time left, zero once the countdown is done
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.started {
            Some(since) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(since)),
            None => self.remaining,
        }
    }

    /// true exactly once, on the first call after the countdown hits zero
    pub fn poll_finished(&mut self, now: Instant) -> bool {
        if self.started.is_some() && self.remaining(now).is_zero() {
            self.started = None;
            self.remaining = Duration::ZERO;
            true
        } else {
            false
        }
    }
}

/// mm:ss readout
#[must_use]
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

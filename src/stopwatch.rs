use std::time::{Duration, Instant};

/// counts up while running and keeps its total across stop/start
///
/// the caller passes the current instant in, so the arithmetic has no hidden
/// clock and stays easy to test
#[derive(Debug, Default, Clone, Copy)]
pub struct Stopwatch {
    accumulated: Duration,
    started: Option<Instant>,
}

impl Stopwatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// begin counting, does nothing if already running
    pub fn start(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    /// pause, banking the running segment
    pub fn stop(&mut self, now: Instant) {
        if let Some(since) = self.started.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started.is_some()
    }

    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started
                .map_or(Duration::ZERO, |since| now.saturating_duration_since(since))
    }
}

/// hh:mm:ss readout, with centiseconds when asked for
#[must_use]
pub fn format_elapsed(elapsed: Duration, show_milliseconds: bool) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);
    if show_milliseconds {
        let centis = elapsed.subsec_millis() / 10;
        format!("{hours:02}:{minutes:02}:{seconds:02}.{centis:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let now = Instant::now();
        let watch = Stopwatch::new();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(now), Duration::ZERO);
    }

    #[test]
    fn counts_while_running() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.start(t0);
        assert!(watch.is_running());
        assert_eq!(watch.elapsed(t0 + Duration::from_secs(5)), Duration::from_secs(5));
    }

    #[test]
    fn stop_banks_the_time() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.start(t0);
        watch.stop(t0 + Duration::from_secs(5));
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(t0 + Duration::from_secs(60)), Duration::from_secs(5));
    }

    #[test]
    fn resumes_where_it_left_off() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.start(t0);
        watch.stop(t0 + Duration::from_secs(5));
        watch.start(t0 + Duration::from_secs(60));
        assert_eq!(watch.elapsed(t0 + Duration::from_secs(62)), Duration::from_secs(7));
    }

    #[test]
    fn starting_twice_does_not_rewind() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.start(t0);
        watch.start(t0 + Duration::from_secs(3));
        assert_eq!(watch.elapsed(t0 + Duration::from_secs(4)), Duration::from_secs(4));
    }

    #[test]
    fn reset_clears_everything() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.start(t0);
        watch.stop(t0 + Duration::from_secs(5));
        watch.reset();
        assert_eq!(watch.elapsed(t0 + Duration::from_secs(10)), Duration::ZERO);
        assert!(!watch.is_running());
    }

    #[test]
    fn readout_formats() {
        let elapsed = Duration::from_millis(3_725_250);
        assert_eq!(format_elapsed(elapsed, false), "01:02:05");
        assert_eq!(format_elapsed(elapsed, true), "01:02:05.25");
        assert_eq!(format_elapsed(Duration::ZERO, true), "00:00:00.00");
    }
}

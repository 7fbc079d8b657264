use std::time::Duration;

use crate::TICK_RATE_MS;

/// Fixed-step session clock.
///
/// Elapsed time advances by exactly one interval per delivered tick while the
/// clock is running; wall-clock drift between ticks is not measured.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionClock {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl SessionClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// No-op when already running.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Idempotent. Ticks delivered after this returns are ignored.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Returns whether the tick advanced elapsed time.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += self.interval;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

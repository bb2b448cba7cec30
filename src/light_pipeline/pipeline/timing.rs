use std::time::{Duration, Instant};

/// Wall-clock durations for the stages of one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickTimings {
    pub capture: Duration,
    pub reduce: Duration,
    pub smooth: Duration,
    pub encode: Duration,
    pub send: Duration,
}

impl TickTimings {
    /// Time spent working this tick, excluding the cadence sleep.
    pub fn total(&self) -> Duration {
        self.capture + self.reduce + self.smooth + self.encode + self.send
    }
}

/// Measures one stage of a tick.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}

use std::time::{Duration, Instant};

/// Frame clock: delta since the previous tick and elapsed time since start.
pub struct Clock {
    start_time: Instant,
    last_tick: Instant,
    /// Time between the last two ticks.
    pub delta: Duration,
    /// Time since creation, as of the last tick.
    pub elapsed: Duration,
    pub frame_count: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_tick: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Samples the wall clock.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.advance_to(now);
    }

    /// Advances by a fixed step, independent of wall time.
    pub fn advance(&mut self, step: Duration) {
        self.advance_to(self.last_tick + step);
    }

    fn advance_to(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_tick);
        self.elapsed = now.saturating_duration_since(self.start_time);
        self.last_tick = now;
        self.frame_count += 1;
    }

    #[inline]
    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[inline]
    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

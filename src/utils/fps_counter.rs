use std::time::{Duration, Instant};

/// Frame rate averaged over a sliding report window.
///
/// The first tick only opens the window; frames are counted from there.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    /// Reports once a second.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    #[must_use]
    pub fn with_window(window: Duration) -> Self {
        Self {
            window: window.max(Duration::from_millis(1)),
            window_start: None,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Counts a frame presented now.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    /// Counts a frame presented at `now`. Returns the new rate when a window
    /// closes.
    pub fn tick_at(&mut self, now: Instant) -> Option<f32> {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return None;
        };

        self.frames += 1;
        let span = now.saturating_duration_since(start);
        if span < self.window {
            return None;
        }

        self.fps = self.frames as f32 / span.as_secs_f32();
        self.frames = 0;
        self.window_start = Some(now);
        Some(self.fps)
    }

    /// Rate measured over the last closed window, zero before the first.
    #[inline]
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_after_window() {
        let mut counter = FpsCounter::new();
        let t0 = Instant::now();
        assert_eq!(counter.tick_at(t0), None);

        for i in 1..60 {
            assert_eq!(counter.tick_at(t0 + Duration::from_millis(i * 16)), None);
        }
        let fps = counter.tick_at(t0 + Duration::from_secs(1)).unwrap();
        assert!((fps - 60.0).abs() < 1e-3);
        assert!((counter.fps() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn window_restarts_after_report() {
        let mut counter = FpsCounter::with_window(Duration::from_millis(100));
        let t0 = Instant::now();
        counter.tick_at(t0);
        assert!(counter.tick_at(t0 + Duration::from_millis(100)).is_some());
        assert_eq!(counter.tick_at(t0 + Duration::from_millis(150)), None);
        let fps = counter.tick_at(t0 + Duration::from_millis(200)).unwrap();
        assert!((fps - 20.0).abs() < 1e-3);
    }
}

//! Frame statistics overlay.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::utils::FpsCounter;

/// Frame times kept for the history plot.
const HISTORY_LEN: usize = 120;

/// `begin()` / `end()` bracket around each frame, observational only.
pub struct Stats {
    fps: FpsCounter,
    frame_start: Option<Instant>,
    history: VecDeque<f32>,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fps: FpsCounter::new(),
            frame_start: None,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn begin(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Closes the bracket opened by [`begin`](Self::begin). Unmatched calls
    /// are ignored.
    pub fn end(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.record(start.elapsed());
        }
        self.fps.tick();
    }

    /// Records how long one frame's work took.
    pub fn record(&mut self, frame_time: Duration) {
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(frame_time.as_secs_f32() * 1000.0);
    }

    /// Frames per second, refreshed once a second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    /// Mean frame time in milliseconds over the history window.
    #[must_use]
    pub fn average_frame_ms(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f32>() / self.history.len() as f32
    }

    #[must_use]
    pub fn history(&self) -> &VecDeque<f32> {
        &self.history
    }

    /// Draws the overlay in the top-left corner.
    pub fn show(&self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("stats_overlay"))
            .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.monospace(format!("{:>5.1} FPS", self.fps()));
                    ui.monospace(format!("{:>5.2} ms", self.average_frame_ms()));
                    self.plot(ui);
                });
            });
    }

    fn plot(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(HISTORY_LEN as f32, 30.0), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_black_alpha(120));

        let max = self.history.iter().copied().fold(1.0_f32, f32::max);
        for (i, ms) in self.history.iter().enumerate() {
            let x = rect.left() + i as f32;
            let h = (ms / max) * rect.height();
            painter.line_segment(
                [egui::pos2(x, rect.bottom()), egui::pos2(x, rect.bottom() - h)],
                egui::Stroke::new(1.0, egui::Color32::LIGHT_GREEN),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_bounded() {
        let mut stats = Stats::new();
        for _ in 0..HISTORY_LEN + 10 {
            stats.record(Duration::from_millis(4));
        }
        assert_eq!(stats.history().len(), HISTORY_LEN);
        assert!((stats.average_frame_ms() - 4.0).abs() < 1e-3);
    }

    #[test]
    fn end_without_begin_records_nothing() {
        let mut stats = Stats::new();
        stats.end();
        assert!(stats.history().is_empty());
    }
}

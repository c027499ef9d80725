use crate::animation::values::Interpolatable;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
}

/// A sequence of `(time, value)` control points.
///
/// Times are non-decreasing and there is exactly one value per time.
/// Sampling outside the keyed range clamps to the first or last value.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Result<Self> {
        if times.is_empty() {
            return Err(Error::InvalidTrack("track has no keyframes".to_string()));
        }
        if times.len() != values.len() {
            return Err(Error::InvalidTrack(format!(
                "{} times but {} values",
                times.len(),
                values.len()
            )));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::InvalidTrack(format!(
                "time {} at key {} is earlier than its predecessor",
                times[i + 1],
                i + 1
            )));
        }

        Ok(Self {
            times,
            values,
            interpolation,
        })
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Time of the last keyframe.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        // First index whose time is strictly greater than `time`.
        let next = self.times.partition_point(|&t| t <= time);

        if next == 0 {
            return self.values[0];
        }
        if next >= self.times.len() {
            return self.values[self.values.len() - 1];
        }

        let index = next - 1;
        let t0 = self.times[index];
        let t1 = self.times[next];
        let span = t1 - t0;

        match self.interpolation {
            InterpolationMode::Step => self.values[index],
            InterpolationMode::Linear => {
                let t = if span > 1e-6 { ((time - t0) / span).clamp(0.0, 1.0) } else { 0.0 };
                T::interpolate_linear(self.values[index], self.values[next], t)
            }
        }
    }
}

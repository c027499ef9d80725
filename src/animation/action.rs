use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::clip::{AnimationClip, TargetPath, TrackData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play to the end once, then finish.
    Once,
    /// Wrap around to the start.
    #[default]
    Repeat,
    /// Alternate forwards and backwards.
    PingPong,
}

/// What happened to an action during one [`AnimationAction::update`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    /// Not scheduled, paused or disabled; the playhead did not move.
    None,
    /// The playhead moved.
    Advanced,
    /// The playhead reached the end of a [`LoopMode::Once`] clip this step.
    Finished,
}

/// Playback state of one clip on one target.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    /// Current sample time, always inside `[0, duration]`.
    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    /// Keep the action paused on its last frame when a `Once` clip ends,
    /// instead of disabling it.
    pub clamp_when_finished: bool,
    pub paused: bool,
    pub enabled: bool,

    // Unfolded playhead used by `PingPong`.
    elapsed: f32,
    scheduled: bool,
    finished: bool,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            paused: false,
            enabled: true,
            elapsed: 0.0,
            scheduled: false,
            finished: false,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Schedules the action. Does not rewind; combine with [`reset`](Self::reset).
    pub fn play(&mut self) -> &mut Self {
        self.scheduled = true;
        self
    }

    /// Unschedules the action and rewinds it.
    pub fn stop(&mut self) -> &mut Self {
        self.scheduled = false;
        self.reset()
    }

    /// Rewinds to time zero and clears the paused / finished flags.
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self.elapsed = 0.0;
        self.paused = false;
        self.enabled = true;
        self.finished = false;
        self
    }

    /// Whether [`play`](Self::play) was called without a later [`stop`](Self::stop).
    #[inline]
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Whether a `Once` clip has played to its end.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scheduled, enabled, not paused and not finished.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.scheduled && self.enabled && !self.paused && !self.finished
    }

    /// Advances the playhead by `dt` seconds scaled by `time_scale`.
    pub fn update(&mut self, dt: f32) -> ActionEvent {
        if !self.is_running() {
            return ActionEvent::None;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return ActionEvent::None;
        }

        self.elapsed += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.elapsed >= duration || self.elapsed < 0.0 {
                    self.time = self.elapsed.clamp(0.0, duration);
                    self.finish();
                    return ActionEvent::Finished;
                }
                self.time = self.elapsed;
            }
            LoopMode::Repeat => {
                self.time = self.elapsed.rem_euclid(duration);
            }
            LoopMode::PingPong => {
                let t = self.elapsed.rem_euclid(duration * 2.0);
                self.time = if t > duration { duration * 2.0 - t } else { t };
            }
        }

        ActionEvent::Advanced
    }

    fn finish(&mut self) {
        self.finished = true;
        if self.clamp_when_finished {
            self.paused = true;
        } else {
            self.enabled = false;
        }
    }

    /// Samples every track of the clip at the current time.
    pub fn samples(&self) -> impl Iterator<Item = ChannelValue> + '_ {
        self.clip.tracks.iter().map(|track| match (&track.data, track.target) {
            (TrackData::Vector3(t), TargetPath::Scale) => ChannelValue::Scale(t.sample(self.time)),
            (TrackData::Vector3(t), _) => ChannelValue::Translation(t.sample(self.time)),
            (TrackData::Quaternion(t), _) => ChannelValue::Rotation(t.sample(self.time)),
        })
    }
}

/// A sampled value routed to a transform channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelValue {
    Translation(Vec3),
    Rotation(Quat),
    Scale(Vec3),
}

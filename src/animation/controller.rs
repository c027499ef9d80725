//! One-shot keyframe animation with play / stop commands.
//!
//! [`KeyframeAnimation`] moves its target along a fixed path
//! `(0,0,0) → (1,1,1) → (2,2,2) → (0,0,0)` keyed at `t = 0, 1, 2, 3` seconds,
//! playing it once per [`play`](KeyframeAnimation::play).

use std::sync::Arc;

use glam::Vec3;

use crate::animation::action::LoopMode;
use crate::animation::clip::{AnimationClip, Track};
use crate::animation::mixer::{ActionHandle, AnimationMixer};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::errors::Result;
use crate::scene::{NodeHandle, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Playing,
}

pub struct KeyframeAnimation {
    clip: Arc<AnimationClip>,
    mixer: AnimationMixer,
    action: ActionHandle,
    state: AnimationState,
}

impl KeyframeAnimation {
    /// Binds the default back-and-forth position clip to `target`.
    pub fn new(target: NodeHandle) -> Result<Self> {
        let track = KeyframeTrack::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![Vec3::ZERO, Vec3::ONE, Vec3::splat(2.0), Vec3::ZERO],
            InterpolationMode::Linear,
        )?;
        let clip = AnimationClip::new("position", -1.0, vec![Track::translation(track)]);
        Ok(Self::with_clip(target, clip))
    }

    /// Binds an arbitrary clip to `target`, played once per `play`.
    #[must_use]
    pub fn with_clip(target: NodeHandle, clip: AnimationClip) -> Self {
        let clip = Arc::new(clip);
        let mut mixer = AnimationMixer::new(target);
        let action = mixer.clip_action(&clip);
        if let Some(a) = mixer.action_mut(action) {
            a.loop_mode = LoopMode::Once;
        }

        Self {
            clip,
            mixer,
            action,
            state: AnimationState::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == AnimationState::Playing
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> NodeHandle {
        self.mixer.root()
    }

    /// Current playhead in seconds.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.mixer.action(self.action).map_or(0.0, |a| a.time)
    }

    /// Restarts playback from time zero, also when already playing.
    pub fn play(&mut self, scene: &Scene) {
        if let Some(action) = self.mixer.action_mut(self.action) {
            action.reset();
        }
        self.mixer.play(self.action, scene);
        self.state = AnimationState::Playing;
    }

    /// Halts playback and puts the target back where it was when playback
    /// started. Does nothing while idle.
    pub fn stop(&mut self, scene: &mut Scene) {
        if self.state == AnimationState::Idle {
            return;
        }
        self.mixer.stop(self.action, scene);
        self.state = AnimationState::Idle;
    }

    /// Advances playback by `delta` seconds. Does nothing while idle.
    pub fn update(&mut self, delta: f32, scene: &mut Scene) {
        if self.state == AnimationState::Idle {
            return;
        }

        let finished = self.mixer.update(delta.max(0.0), scene);
        if finished.contains(&self.action) {
            log::debug!("Animation '{}' finished", self.clip.name);
            self.state = AnimationState::Idle;
        }
    }
}

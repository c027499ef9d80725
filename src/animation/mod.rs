//! Keyframe Animation
//!
//! A small animation system in the style of a clip / mixer / action stack:
//!
//! - [`KeyframeTrack`]: time keyed values with linear or step interpolation
//! - [`AnimationClip`]: a named set of tracks bound to transform channels
//! - [`AnimationAction`]: playback state of a clip (time, loop mode, pause)
//! - [`AnimationMixer`]: drives actions on one scene node
//! - [`KeyframeAnimation`]: a play-once controller with explicit
//!   [`AnimationState`]

pub mod action;
pub mod clip;
pub mod controller;
pub mod mixer;
pub mod tracks;
mod values;

pub use action::{ActionEvent, AnimationAction, ChannelValue, LoopMode};
pub use clip::{AnimationClip, TargetPath, Track, TrackData};
pub use controller::{AnimationState, KeyframeAnimation};
pub use mixer::{ActionHandle, AnimationMixer};
pub use tracks::{InterpolationMode, KeyframeTrack};
pub use values::Interpolatable;

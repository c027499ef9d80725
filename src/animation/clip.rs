use glam::{Quat, Vec3};

use crate::animation::tracks::KeyframeTrack;

/// The transform channel a track drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            Self::Vector3(t) => t.end_time(),
            Self::Quaternion(t) => t.end_time(),
        }
    }
}

/// A keyframe track bound to one transform channel.
#[derive(Debug, Clone)]
pub struct Track {
    pub target: TargetPath,
    pub data: TrackData,
}

impl Track {
    /// A `.position` track.
    #[must_use]
    pub fn translation(track: KeyframeTrack<Vec3>) -> Self {
        Self {
            target: TargetPath::Translation,
            data: TrackData::Vector3(track),
        }
    }

    /// A `.quaternion` track.
    #[must_use]
    pub fn rotation(track: KeyframeTrack<Quat>) -> Self {
        Self {
            target: TargetPath::Rotation,
            data: TrackData::Quaternion(track),
        }
    }

    /// A `.scale` track.
    #[must_use]
    pub fn scale(track: KeyframeTrack<Vec3>) -> Self {
        Self {
            target: TargetPath::Scale,
            data: TrackData::Vector3(track),
        }
    }
}

/// A named bundle of tracks.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Creates a clip. A negative `duration` is replaced by the time of the
    /// latest keyframe across all tracks.
    #[must_use]
    pub fn new(name: impl Into<String>, duration: f32, tracks: Vec<Track>) -> Self {
        let duration = if duration < 0.0 {
            tracks
                .iter()
                .map(|t| t.data.end_time())
                .fold(0.0_f32, f32::max)
        } else {
            duration
        };

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }
}

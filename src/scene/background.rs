//! Scene background and ambient lighting.

use crate::assets::TextureHandle;
use crate::resources::Color;

/// What fills the pixels no geometry covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Hardware clear with a solid color.
    Color(Color),
    /// A cube texture drawn as an infinitely distant box.
    CubeMap(TextureHandle),
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(Color::BLACK)
    }
}

impl Background {
    #[must_use]
    pub fn cube_map(&self) -> Option<TextureHandle> {
        match self {
            Self::CubeMap(handle) => Some(*handle),
            Self::Color(_) => None,
        }
    }
}

/// Uniform light applied equally to every lit surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    #[must_use]
    pub fn new(hex: u32) -> Self {
        Self {
            color: Color::from_hex(hex),
            intensity: 1.0,
        }
    }
}

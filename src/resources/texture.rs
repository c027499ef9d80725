//! CPU-side texture data.

use std::borrow::Cow;

/// Layout of a texture on the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    D2,
    /// Six square layers in `+X, -X, +Y, -Y, +Z, -Z` order.
    Cube,
}

/// RGBA8 pixel data for a 2D texture or a cube map.
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: Cow<'static, str>,
    pub width: u32,
    pub height: u32,
    pub kind: TextureKind,
    /// Whether the texels are sRGB encoded (color data) rather than linear.
    pub srgb: bool,
    /// Tightly packed RGBA8 rows; cube faces follow each other.
    pub data: Vec<u8>,
}

impl Texture {
    #[must_use]
    pub fn new_2d(name: impl Into<Cow<'static, str>>, width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            kind: TextureKind::D2,
            srgb: true,
            data,
        }
    }

    /// Concatenates six equally sized square faces.
    #[must_use]
    pub fn new_cube(name: impl Into<Cow<'static, str>>, size: u32, faces: [Vec<u8>; 6]) -> Self {
        Self {
            name: name.into(),
            width: size,
            height: size,
            kind: TextureKind::Cube,
            srgb: true,
            data: faces.concat(),
        }
    }

    /// A 1x1 texture of a single color.
    #[must_use]
    pub fn solid(name: impl Into<Cow<'static, str>>, rgba: [u8; 4]) -> Self {
        Self::new_2d(name, 1, 1, rgba.to_vec())
    }

    /// A 1x1 cube map with every face set to one color.
    #[must_use]
    pub fn solid_cube(name: impl Into<Cow<'static, str>>, rgba: [u8; 4]) -> Self {
        Self::new_cube(name, 1, std::array::from_fn(|_| rgba.to_vec()))
    }

    #[inline]
    #[must_use]
    pub fn layer_count(&self) -> u32 {
        match self.kind {
            TextureKind::D2 => 1,
            TextureKind::Cube => 6,
        }
    }

    /// Bytes one layer should occupy.
    #[inline]
    #[must_use]
    pub fn layer_size(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Whether `data` matches the declared dimensions.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() == self.layer_size() * self.layer_count() as usize
    }
}

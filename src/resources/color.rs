//! Linear RGB colors with sRGB hex conversion.

use glam::{Vec3, Vec4};

/// A color in linear RGB space.
///
/// Hex values such as `0xbbbbbb` are interpreted as sRGB, the convention of
/// CSS colors and color pickers, and converted on the way in and out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::from_linear(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::from_linear(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn from_linear(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a packed `0xRRGGBB` sRGB value. Bits above the
    /// low 24 are ignored.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = (hex & 0x00ff_ffff).to_be_bytes();
        Self {
            r: srgb_to_linear(f32::from(r) / 255.0),
            g: srgb_to_linear(f32::from(g) / 255.0),
            b: srgb_to_linear(f32::from(b) / 255.0),
        }
    }

    /// Packs the color back into `0xRRGGBB` sRGB.
    #[must_use]
    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn set_hex(&mut self, hex: u32) {
        *self = Self::from_hex(hex);
    }

    #[inline]
    #[must_use]
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    #[inline]
    #[must_use]
    pub fn to_vec4(&self, alpha: f32) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, alpha)
    }

}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

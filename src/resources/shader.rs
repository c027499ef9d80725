//! Custom fragment shader materials.
//!
//! A [`ShaderMaterial`] supplies the body of a WGSL function
//!
//! ```wgsl
//! fn shade(frag_coord: vec2<f32>) -> vec3<f32>
//! ```
//!
//! where `frag_coord` is the pixel position with a bottom-left origin. The
//! renderer provides `shader_time()` and `shader_resolution()` from the
//! material's [`ShaderUniforms`], pushed once per frame.
//!
//! The CPU functions in this module compute the same colors as the built-in
//! programs so that their math can be checked without a GPU.

use std::borrow::Cow;

use glam::{Vec2, Vec3};

const PULSE_WGSL: &str = include_str!("shaders/pulse.wgsl");
const GRADIENT_WGSL: &str = include_str!("shaders/gradient.wgsl");

/// Host values visible to a custom shader.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShaderUniforms {
    /// Elapsed seconds.
    pub time: f32,
    /// Surface size in physical pixels.
    pub resolution: Vec2,
}

#[derive(Debug, Clone)]
pub struct ShaderMaterial {
    pub fragment: Cow<'static, str>,
    pub uniforms: ShaderUniforms,
}

impl ShaderMaterial {
    /// Gray pulsing with `0.5 * cos(time) + 0.5`.
    #[must_use]
    pub fn pulse() -> Self {
        Self::custom(PULSE_WGSL)
    }

    /// Screen-space gradient `0.5 * cos(time + 10 * uv.xyx) + 0.5`.
    #[must_use]
    pub fn gradient() -> Self {
        Self::custom(GRADIENT_WGSL)
    }

    /// A material from a WGSL `shade` function body.
    #[must_use]
    pub fn custom(fragment: impl Into<Cow<'static, str>>) -> Self {
        Self {
            fragment: fragment.into(),
            uniforms: ShaderUniforms::default(),
        }
    }

    /// Pushes this frame's uniform values.
    pub fn set_uniforms(&mut self, time: f32, resolution: Vec2) {
        self.uniforms = ShaderUniforms { time, resolution };
    }
}

// ============================================================================
// CPU reference implementations
// ============================================================================

/// `0.5 * cos(time) + 0.5` on every channel.
#[must_use]
pub fn pulse_color(time: f32) -> Vec3 {
    Vec3::splat(0.5 * time.cos() + 0.5)
}

/// Normalizes a bottom-left origin pixel position by the surface size.
///
/// A zero-sized surface is treated as 1x1.
#[must_use]
pub fn frag_coord_to_uv(frag_coord: Vec2, resolution: Vec2) -> Vec2 {
    frag_coord / resolution.max(Vec2::ONE)
}

/// `0.5 * cos(time + 10 * uv.xyx) + 0.5`.
#[must_use]
pub fn gradient_color(time: f32, uv: Vec2) -> Vec3 {
    let phase = Vec3::splat(time) + 10.0 * Vec3::new(uv.x, uv.y, uv.x);
    Vec3::new(phase.x.cos(), phase.y.cos(), phase.z.cos()) * 0.5 + Vec3::splat(0.5)
}

/// [`gradient_color`] for a pixel of a surface of the given size.
#[must_use]
pub fn gradient_color_at(time: f32, frag_coord: Vec2, resolution: Vec2) -> Vec3 {
    gradient_color(time, frag_coord_to_uv(frag_coord, resolution))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_programs_define_shade() {
        for src in [PULSE_WGSL, GRADIENT_WGSL] {
            assert!(src.contains("fn shade(frag_coord: vec2<f32>) -> vec3<f32>"));
        }
    }

    #[test]
    fn zero_resolution_does_not_divide_by_zero() {
        let uv = frag_coord_to_uv(Vec2::new(3.0, 4.0), Vec2::ZERO);
        assert!(uv.is_finite());
    }
}

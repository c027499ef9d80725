//! Renderer Settings
//!
//! [`RenderSettings`] is consumed once by [`Renderer::init`](super::Renderer::init)
//! to create the GPU context.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use myth_playground::renderer::RenderSettings;
//!
//! // Let wgpu pick the best backend
//! let settings = RenderSettings::default();
//!
//! // Ask for an OpenGL context with WebGL2-level limits
//! let settings = RenderSettings::webgl2();
//!
//! App::new().with_settings(settings).run::<MyApp>()?;
//! ```

use crate::resources::Color;

/// Global configuration for renderer initialization.
///
/// | Field              | Description                              | Default            |
/// |--------------------|------------------------------------------|--------------------|
/// | `vsync`            | Vertical sync enabled                    | `true`             |
/// | `backends`         | Forced wgpu backend (or auto)            | `None`             |
/// | `power_preference` | GPU adapter selection strategy           | `HighPerformance`  |
/// | `clear_color`      | Clear color when the scene has none      | Black              |
/// | `required_limits`  | Required wgpu limits                     | Default            |
/// | `depth_format`     | Depth buffer texture format              | `Depth32Float`     |
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Caps the frame rate to the display refresh rate when `true`.
    pub vsync: bool,

    /// Force a specific wgpu backend (Vulkan, Metal, DX12, GL, ...).
    ///
    /// `None` lets wgpu choose. When a forced backend has no adapter the
    /// context logs a warning and retries with every backend.
    pub backends: Option<wgpu::Backends>,

    /// GPU adapter selection preference.
    pub power_preference: wgpu::PowerPreference,

    /// Linear clear color, used when the scene background is a cube map that
    /// is not uploaded yet.
    pub clear_color: Color,

    /// Required wgpu limits (max buffer sizes, binding counts, etc.).
    pub required_limits: wgpu::Limits,

    /// Depth buffer texture format.
    pub depth_format: wgpu::TextureFormat,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            backends: None,
            power_preference: wgpu::PowerPreference::HighPerformance,
            clear_color: Color::BLACK,
            required_limits: wgpu::Limits::default(),
            depth_format: wgpu::TextureFormat::Depth32Float,
        }
    }
}

impl RenderSettings {
    /// An explicitly requested OpenGL (ES) context restricted to the WebGL2
    /// feature level.
    #[must_use]
    pub fn webgl2() -> Self {
        Self {
            backends: Some(wgpu::Backends::GL),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            ..Self::default()
        }
    }

    /// Backends the instance is created with.
    #[inline]
    #[must_use]
    pub fn instance_backends(&self) -> wgpu::Backends {
        self.backends.unwrap_or_else(wgpu::Backends::all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webgl2_forces_gl_backend() {
        let settings = RenderSettings::webgl2();
        assert_eq!(settings.instance_backends(), wgpu::Backends::GL);
        assert_eq!(
            settings.required_limits.max_texture_dimension_2d,
            wgpu::Limits::downlevel_webgl2_defaults().max_texture_dimension_2d
        );
    }

    #[test]
    fn default_lets_wgpu_choose() {
        assert_eq!(RenderSettings::default().instance_backends(), wgpu::Backends::all());
    }
}

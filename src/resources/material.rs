//! Surface descriptions.
//!
//! - [`MaterialKind::Basic`]: unlit color, optionally multiplied by an
//!   environment reflection
//! - [`MaterialKind::Standard`]: base color lit by the scene's ambient light
//! - [`MaterialKind::Line`]: vertex colors times a tint, for helpers
//! - [`MaterialKind::Shader`]: a custom WGSL `shade` function

use std::borrow::Cow;

use crate::assets::TextureHandle;
use crate::resources::Color;
use crate::resources::shader::ShaderMaterial;

/// Which faces are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    pub map: Option<TextureHandle>,
    /// Cube map sampled along the reflected view direction.
    pub env_map: Option<TextureHandle>,
    /// Blend between the plain color (0) and color times reflection (1).
    pub reflectivity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
    pub map: Option<TextureHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMaterial {
    pub color: Color,
}

#[derive(Debug, Clone)]
pub enum MaterialKind {
    Basic(BasicMaterial),
    Standard(StandardMaterial),
    Line(LineMaterial),
    Shader(ShaderMaterial),
}

#[derive(Debug, Clone)]
pub struct Material {
    pub name: Cow<'static, str>,
    pub kind: MaterialKind,
    pub side: Side,
    pub depth_write: bool,
}

impl Material {
    #[must_use]
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            name: Cow::Borrowed("Material"),
            kind,
            side: Side::Front,
            depth_write: true,
        }
    }

    #[must_use]
    pub fn basic(color: Color) -> Self {
        Self::new(MaterialKind::Basic(BasicMaterial {
            color,
            map: None,
            env_map: None,
            reflectivity: 1.0,
        }))
    }

    #[must_use]
    pub fn standard(color: Color) -> Self {
        Self::new(MaterialKind::Standard(StandardMaterial { color, map: None }))
    }

    #[must_use]
    pub fn line() -> Self {
        Self::new(MaterialKind::Line(LineMaterial { color: Color::WHITE }))
    }

    #[must_use]
    pub fn shader(shader: ShaderMaterial) -> Self {
        Self::new(MaterialKind::Shader(shader))
    }

    // === Builder helpers ===

    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Sets the environment map of a basic material; ignored by other kinds.
    #[must_use]
    pub fn with_env_map(mut self, env_map: Option<TextureHandle>) -> Self {
        if let MaterialKind::Basic(basic) = &mut self.kind {
            basic.env_map = env_map;
        }
        self
    }

    /// Sets the color map of a basic or standard material.
    #[must_use]
    pub fn with_map(mut self, map: Option<TextureHandle>) -> Self {
        match &mut self.kind {
            MaterialKind::Basic(m) => m.map = map,
            MaterialKind::Standard(m) => m.map = map,
            MaterialKind::Line(_) | MaterialKind::Shader(_) => {}
        }
        self
    }

    // === Accessors ===

    /// Base color, for every kind except custom shaders.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match &self.kind {
            MaterialKind::Basic(m) => Some(m.color),
            MaterialKind::Standard(m) => Some(m.color),
            MaterialKind::Line(m) => Some(m.color),
            MaterialKind::Shader(_) => None,
        }
    }

    pub fn color_mut(&mut self) -> Option<&mut Color> {
        match &mut self.kind {
            MaterialKind::Basic(m) => Some(&mut m.color),
            MaterialKind::Standard(m) => Some(&mut m.color),
            MaterialKind::Line(m) => Some(&mut m.color),
            MaterialKind::Shader(_) => None,
        }
    }

    pub fn as_shader_mut(&mut self) -> Option<&mut ShaderMaterial> {
        match &mut self.kind {
            MaterialKind::Shader(s) => Some(s),
            _ => None,
        }
    }

    /// Color and environment textures referenced by this material.
    #[must_use]
    pub fn textures(&self) -> (Option<TextureHandle>, Option<TextureHandle>) {
        match &self.kind {
            MaterialKind::Basic(m) => (m.map, m.env_map),
            MaterialKind::Standard(m) => (m.map, None),
            MaterialKind::Line(_) | MaterialKind::Shader(_) => (None, None),
        }
    }
}

//! GPU uniform layouts.
//!
//! Both structs mirror the WGSL declarations in `shaders/common.wgsl` and
//! `shaders/skybox.wgsl`; every member is 16-byte aligned so the Rust and
//! WGSL layouts agree without padding fields.

use bytemuck::{Pod, Zeroable};
use glam::{Affine3A, Mat4, Vec2, Vec3, Vec4};

use crate::resources::{Color, Material, MaterialKind};

/// Per-frame values shared by every draw (group 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlobalUniforms {
    pub view_projection: Mat4,
    /// Inverse of the projection times the rotation-only view, used to
    /// reconstruct skybox directions.
    pub sky_inverse: Mat4,
    /// xyz: camera world position.
    pub camera_position: Vec4,
    /// rgb: ambient color times intensity; w: 1 when an ambient light exists.
    pub ambient: Vec4,
    /// x: elapsed seconds; yz: surface size in pixels.
    pub time_resolution: Vec4,
}

impl Default for GlobalUniforms {
    fn default() -> Self {
        Self {
            view_projection: Mat4::IDENTITY,
            sky_inverse: Mat4::IDENTITY,
            camera_position: Vec4::ZERO,
            ambient: Vec4::ZERO,
            time_resolution: Vec4::ZERO,
        }
    }
}

impl GlobalUniforms {
    pub fn new(
        projection: Mat4,
        camera_world: &Affine3A,
        ambient: Option<(Color, f32)>,
        time: f32,
        resolution: Vec2,
    ) -> Self {
        let view = Mat4::from(camera_world.inverse());
        let mut rotation_only = view;
        rotation_only.w_axis = Vec4::W;

        let ambient = ambient.map_or(Vec4::ZERO, |(color, intensity)| {
            (color.to_vec3() * intensity).extend(1.0)
        });

        Self {
            view_projection: projection * view,
            sky_inverse: (projection * rotation_only).inverse(),
            camera_position: Vec3::from(camera_world.translation).extend(1.0),
            ambient,
            time_resolution: Vec4::new(time, resolution.x, resolution.y, 0.0),
        }
    }
}

/// Per-mesh values (group 1, binding 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: Mat4,
    pub normal_matrix: Mat4,
    /// Linear base color, alpha 1.
    pub color: Vec4,
    /// x: shader time; yz: shader resolution; w: reflectivity.
    pub params: Vec4,
    /// x: 1 when a color map is bound; y: 1 when an environment map is bound.
    pub flags: Vec4,
}

impl ObjectUniforms {
    pub fn new(world: &Affine3A, material: &Material, has_map: bool, has_env_map: bool) -> Self {
        let model = Mat4::from(*world);
        let normal_matrix = model.inverse().transpose();

        let color = material.color().map_or(Vec4::ONE, |c| c.to_vec4(1.0));
        let params = match &material.kind {
            MaterialKind::Basic(basic) => Vec4::new(0.0, 0.0, 0.0, basic.reflectivity),
            MaterialKind::Shader(shader) => {
                let u = shader.uniforms;
                Vec4::new(u.time, u.resolution.x, u.resolution.y, 0.0)
            }
            MaterialKind::Standard(_) | MaterialKind::Line(_) => Vec4::ZERO,
        };

        Self {
            model,
            normal_matrix,
            color,
            params,
            flags: Vec4::new(f32::from(u8::from(has_map)), f32::from(u8::from(has_env_map)), 0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::resources::ShaderMaterial;

    #[test]
    fn layouts_are_sixteen_byte_multiples() {
        assert_eq!(std::mem::size_of::<GlobalUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniforms>() % 16, 0);
    }

    #[test]
    fn sky_inverse_ignores_camera_translation() {
        let projection = Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
        let near = GlobalUniforms::new(projection, &Affine3A::IDENTITY, None, 0.0, Vec2::ONE);
        let far = GlobalUniforms::new(
            projection,
            &Affine3A::from_translation(Vec3::new(10.0, -3.0, 7.0)),
            None,
            0.0,
            Vec2::ONE,
        );
        assert!(near.sky_inverse.abs_diff_eq(far.sky_inverse, 1e-5));
        assert!(!near.view_projection.abs_diff_eq(far.view_projection, 1e-5));
    }

    #[test]
    fn shader_uniforms_reach_params() {
        let mut shader = ShaderMaterial::gradient();
        shader.set_uniforms(2.5, Vec2::new(640.0, 480.0));
        let material = Material::shader(shader);
        let u = ObjectUniforms::new(&Affine3A::IDENTITY, &material, false, false);
        assert_eq!(u.params, Vec4::new(2.5, 640.0, 480.0, 0.0));
        assert_eq!(u.color, Vec4::ONE);
    }
}

use glam::{Affine3A, Mat4, Vec3};

/// A perspective camera. The view matrix comes from the owning node.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view, in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    projection_matrix: Mat4,
}

impl Camera {
    /// `fov` is the vertical field of view in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    /// Recomputes the projection after `fov`, `aspect`, `near` or `far` changed.
    pub fn update_projection_matrix(&mut self) {
        // wgpu clip space: depth in [0, 1]
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect.max(1e-6), self.near, self.far);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > f32::EPSILON {
            self.aspect = aspect;
            self.update_projection_matrix();
        }
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// View matrix for a camera whose node has `world_matrix`.
    #[inline]
    #[must_use]
    pub fn view_matrix(world_matrix: &Affine3A) -> Mat4 {
        Mat4::from(world_matrix.inverse())
    }

    /// Projection times view for a camera whose node has `world_matrix`.
    #[must_use]
    pub fn view_projection(&self, world_matrix: &Affine3A) -> Mat4 {
        self.projection_matrix * Self::view_matrix(world_matrix)
    }

    /// Unit vector the camera looks along, in world space.
    #[must_use]
    pub fn forward(world_matrix: &Affine3A) -> Vec3 {
        world_matrix.transform_vector3(Vec3::NEG_Z).normalize_or_zero()
    }
}

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::resources::input::{Input, MouseButton};
use crate::scene::transform::Transform;

/// Orbit camera: left drag rotates around `target`, right drag pans,
/// the wheel zooms.
///
/// The camera position is stored in spherical coordinates around the target
/// (`theta` around Y, `phi` from the +Y pole).
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    pub target: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,
}

impl OrbitControls {
    /// Controls for a camera at `position` looking at `target`.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(1e-4);

        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 0.5,
            max_distance: 500.0,

            target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),

            rotate_delta: Vec2::ZERO,
        }
    }

    /// Camera position implied by the current spherical coordinates.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target + Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius
    }

    /// Applies this frame's input and writes the camera transform.
    pub fn update(&mut self, transform: &mut Transform, input: &Input, fov_radians: f32, dt: f32) {
        let screen_height = input.screen_size().y.max(1.0);
        let pointer_free = !input.is_pointer_captured();

        if pointer_free && input.get_mouse_button(MouseButton::Left) {
            let rotate_per_pixel = 2.0 * PI / screen_height;
            self.rotate_delta -= input.mouse_delta() * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            let retention = (1.0 - self.damping_factor).powf(dt * 60.0);
            let applied = self.rotate_delta * (1.0 - retention);
            self.theta += applied.x;
            self.phi += applied.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        const EPS: f32 = 1e-4;
        self.phi = self.phi.clamp(EPS, PI - EPS);

        let scroll = input.scroll_delta().y;
        if pointer_free && scroll != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(scroll.abs());
            if scroll > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
        }
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);

        if pointer_free && input.get_mouse_button(MouseButton::Right) {
            let world_height = 2.0 * self.radius * (fov_radians / 2.0).tan();
            let pixels_to_world = world_height / screen_height;

            let forward = (self.target - self.position()).normalize_or_zero();
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward).normalize_or_zero();

            let delta = input.mouse_delta();
            self.target += (right * -delta.x + up * delta.y) * pixels_to_world * self.pan_speed;
        }

        transform.position = self.position();
        transform.look_at(self.target, Vec3::Y);
    }
}

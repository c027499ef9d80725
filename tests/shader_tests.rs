//! Time-driven shader color tests
//!
//! Tests for:
//! - Pulse color: 0.5 * cos(time) + 0.5
//! - Gradient color: 0.5 * cos(time + 10 * uv.xyx) + 0.5
//! - Pixel to uv normalization
//! - ShaderMaterial uniforms and generated WGSL program

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use myth_playground::renderer::pipeline::program_source;
use myth_playground::resources::shader::{frag_coord_to_uv, gradient_color, gradient_color_at, pulse_color};
use myth_playground::resources::{Material, ShaderMaterial};

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn in_unit_cube(c: Vec3) -> bool {
    c.min_element() >= 0.0 && c.max_element() <= 1.0
}

// ============================================================================
// Pulse
// ============================================================================

#[test]
fn pulse_is_white_at_time_zero() {
    assert!(vec3_approx(pulse_color(0.0), Vec3::ONE));
}

#[test]
fn pulse_is_black_at_pi() {
    assert!(vec3_approx(pulse_color(PI), Vec3::ZERO));
}

#[test]
fn pulse_is_periodic() {
    for i in 0..20 {
        let t = i as f32 * 0.37;
        assert!(vec3_approx(pulse_color(t), pulse_color(t + TAU)), "t = {t}");
    }
}

#[test]
fn pulse_stays_in_unit_range() {
    for i in 0..100 {
        assert!(in_unit_cube(pulse_color(i as f32 * 0.1)));
    }
}

#[test]
fn pulse_channels_are_equal() {
    let c = pulse_color(1.234);
    assert_eq!(c.x, c.y);
    assert_eq!(c.y, c.z);
}

// ============================================================================
// Gradient
// ============================================================================

#[test]
fn gradient_at_origin_matches_pulse() {
    for t in [0.0, 0.5, 1.0, 3.0, 10.0] {
        assert!(vec3_approx(gradient_color(t, Vec2::ZERO), pulse_color(t)));
    }
}

#[test]
fn gradient_uses_xyx_swizzle() {
    let c = gradient_color(0.7, Vec2::new(0.3, 0.8));
    assert_eq!(c.x, c.z);
    assert_ne!(c.x, c.y);
}

#[test]
fn gradient_changes_with_resolution() {
    let pixel = Vec2::new(100.0, 50.0);
    let small = gradient_color_at(1.0, pixel, Vec2::new(640.0, 480.0));
    let large = gradient_color_at(1.0, pixel, Vec2::new(1920.0, 1080.0));
    assert!(!vec3_approx(small, large));
}

#[test]
fn gradient_changes_with_time() {
    let uv = Vec2::new(0.25, 0.75);
    assert!(!vec3_approx(gradient_color(0.0, uv), gradient_color(1.0, uv)));
}

#[test]
fn gradient_stays_in_unit_range() {
    for i in 0..10 {
        for j in 0..10 {
            let uv = Vec2::new(i as f32 / 9.0, j as f32 / 9.0);
            assert!(in_unit_cube(gradient_color(i as f32, uv)));
        }
    }
}

#[test]
fn uv_normalizes_by_resolution() {
    let uv = frag_coord_to_uv(Vec2::new(320.0, 120.0), Vec2::new(640.0, 480.0));
    assert_eq!(uv, Vec2::new(0.5, 0.25));
}

// ============================================================================
// ShaderMaterial
// ============================================================================

#[test]
fn shader_uniforms_start_at_zero() {
    let shader = ShaderMaterial::pulse();
    assert_eq!(shader.uniforms.time, 0.0);
    assert_eq!(shader.uniforms.resolution, Vec2::ZERO);
}

#[test]
fn set_uniforms_replaces_values() {
    let mut shader = ShaderMaterial::gradient();
    shader.set_uniforms(2.5, Vec2::new(800.0, 600.0));
    assert_eq!(shader.uniforms.time, 2.5);
    assert_eq!(shader.uniforms.resolution, Vec2::new(800.0, 600.0));
}

#[test]
fn program_source_appends_custom_body() {
    let src = program_source(&Material::shader(ShaderMaterial::pulse()));
    assert!(src.contains("fn shade(frag_coord: vec2<f32>) -> vec3<f32>"));
    assert!(src.contains("fn shader_time()"));
    assert!(src.contains("fn vs_main"));
}

#[test]
fn custom_shader_body_is_kept_verbatim() {
    let body = "fn shade(frag_coord: vec2<f32>) -> vec3<f32> { return vec3<f32>(0.25); }";
    let mut material = Material::shader(ShaderMaterial::custom(body));
    assert!(program_source(&material).ends_with(body));

    material.as_shader_mut().unwrap().set_uniforms(1.0, Vec2::ONE);
    assert!(program_source(&material).ends_with(body));
}

#[test]
fn shader_material_has_no_color() {
    let mut material = Material::shader(ShaderMaterial::pulse());
    assert!(material.color().is_none());
    assert!(material.color_mut().is_none());
}

//! Geometry and texture data tests
//!
//! Tests for:
//! - Box, axes and grid primitives
//! - Vertex interleaving defaults
//! - Bounding boxes
//! - Texture layer bookkeeping
//! - Color hex conversion

use glam::Vec3;
use myth_playground::resources::color::{linear_to_srgb, srgb_to_linear};
use myth_playground::resources::{Color, Geometry, Texture, TextureKind, Topology};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

// ============================================================================
// Box
// ============================================================================

#[test]
fn geometry_box_has_correct_attributes() {
    let geo = Geometry::new_box(1.0, 1.0, 1.0);
    assert_eq!(geo.vertex_count(), 24);
    assert_eq!(geo.draw_count(), 36);
    assert_eq!(geo.normals.as_ref().map(Vec::len), Some(24));
    assert_eq!(geo.uvs.as_ref().map(Vec::len), Some(24));
    assert_eq!(geo.topology, Topology::TriangleList);
}

#[test]
fn geometry_box_bounding_volume() {
    let geo = Geometry::new_box(2.0, 4.0, 100.0);
    let (min, max) = geo.bounding_box().unwrap();
    assert!(vec3_approx(min, Vec3::new(-1.0, -2.0, -50.0)));
    assert!(vec3_approx(max, Vec3::new(1.0, 2.0, 50.0)));
}

#[test]
fn geometry_box_triangles_wind_counter_clockwise_outward() {
    let geo = Geometry::new_box(1.0, 1.0, 1.0);
    let indices = geo.indices.as_ref().unwrap();
    let normals = geo.normals.as_ref().unwrap();

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(geo.positions[i as usize]));
        let face_normal = (b - a).cross(c - a).normalize();
        let expected = Vec3::from(normals[tri[0] as usize]);
        assert!(vec3_approx(face_normal, expected), "triangle {tri:?} faces {face_normal}");
    }
}

#[test]
fn geometry_box_indices_in_range() {
    let geo = Geometry::new_box(1.0, 1.0, 1.0);
    let count = geo.vertex_count() as u32;
    assert!(geo.indices.as_ref().unwrap().iter().all(|&i| i < count));
}

// ============================================================================
// Helpers
// ============================================================================

#[test]
fn geometry_axes_are_colored_lines() {
    let geo = Geometry::new_axes(10.0);
    assert_eq!(geo.topology, Topology::LineList);
    assert_eq!(geo.vertex_count(), 6);
    assert_eq!(geo.positions[1], [10.0, 0.0, 0.0]);
    assert_eq!(geo.positions[3], [0.0, 10.0, 0.0]);
    assert_eq!(geo.positions[5], [0.0, 0.0, 10.0]);

    let colors = geo.colors.as_ref().unwrap();
    assert_eq!(colors[0], [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(colors[2], [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(colors[4], [0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn geometry_grid_line_count() {
    let geo = Geometry::new_grid(20.0, 20);
    assert_eq!(geo.topology, Topology::LineList);
    // 21 lines in each direction, two vertices each
    assert_eq!(geo.vertex_count(), 21 * 4);
    let (min, max) = geo.bounding_box().unwrap();
    assert!(vec3_approx(min, Vec3::new(-10.0, 0.0, -10.0)));
    assert!(vec3_approx(max, Vec3::new(10.0, 0.0, 10.0)));
}

#[test]
fn geometry_grid_zero_divisions_clamped() {
    let geo = Geometry::new_grid(1.0, 0);
    assert_eq!(geo.vertex_count(), 8);
}

// ============================================================================
// Interleaving
// ============================================================================

#[test]
fn interleave_fills_missing_attributes() {
    let geo = Geometry {
        positions: vec![[1.0, 2.0, 3.0]],
        ..Default::default()
    };
    let vertices = geo.interleave();
    assert_eq!(vertices.len(), 1);
    assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
    assert_eq!(vertices[0].uv, [0.0, 0.0]);
    assert_eq!(vertices[0].color, [1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn interleaved_vertex_is_48_bytes() {
    assert_eq!(std::mem::size_of::<myth_playground::resources::Vertex>(), 48);
}

#[test]
fn empty_geometry_has_no_bounds() {
    assert!(Geometry::default().bounding_box().is_none());
}

// ============================================================================
// Textures
// ============================================================================

#[test]
fn solid_cube_has_six_layers() {
    let tex = Texture::solid_cube("white", [255; 4]);
    assert_eq!(tex.kind, TextureKind::Cube);
    assert_eq!(tex.layer_count(), 6);
    assert_eq!(tex.data.len(), 24);
    assert!(tex.is_consistent());
}

#[test]
fn truncated_texture_is_inconsistent() {
    let tex = Texture::new_2d("bad", 4, 4, vec![0; 10]);
    assert!(!tex.is_consistent());
}

// ============================================================================
// Color
// ============================================================================

#[test]
fn color_hex_round_trip() {
    for hex in [0x000000, 0xffffff, 0xbbbbbb, 0x44aa88, 0x123456] {
        assert_eq!(Color::from_hex(hex).to_hex(), hex);
    }
}

#[test]
fn color_hex_ignores_high_bits() {
    assert_eq!(Color::from_hex(0xff00_ff00), Color::from_hex(0x00ff00));
}

#[test]
fn color_hex_is_srgb_encoded() {
    let mid = Color::from_hex(0x808080);
    assert!(mid.r < 0.5, "0x80 decodes to linear {}", mid.r);
    assert!(approx(linear_to_srgb(srgb_to_linear(0.5)), 0.5));
}

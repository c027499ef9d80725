//! Transform and hierarchy propagation tests
//!
//! Tests for:
//! - Transform TRS operations and dirty checking
//! - Euler angle round-trip
//! - look_at orientation
//! - apply_local_matrix decomposition
//! - World matrix and visibility propagation through Scene
//! - Camera projection and aspect updates

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Affine3A, Mat4, Quat, Vec3};
use myth_playground::scene::{Camera, Node, Scene, Transform};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// ============================================================================
// Transform Unit Tests
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
    assert_eq!(*t.local_matrix(), Affine3A::IDENTITY);
}

#[test]
fn transform_first_update_always_rebuilds() {
    let mut t = Transform::new();
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());
}

#[test]
fn transform_detects_position_change() {
    let mut t = Transform::new();
    t.update_local_matrix();
    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(vec3_approx(t.local_matrix().translation.into(), Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn transform_mark_dirty_forces_rebuild() {
    let mut t = Transform::new();
    t.update_local_matrix();
    t.mark_dirty();
    assert!(t.update_local_matrix());
}

#[test]
fn transform_euler_round_trip() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.3, -0.2, 0.1);
    assert!(vec3_approx(t.rotation_euler(), Vec3::new(0.3, -0.2, 0.1)));
}

#[test]
fn translate_x_follows_local_rotation() {
    let mut t = Transform::new();
    t.rotation = Quat::from_rotation_y(FRAC_PI_2);
    t.translate_x(2.0);
    // +X rotated 90° about Y points along -Z
    assert!(vec3_approx(t.position, Vec3::new(0.0, 0.0, -2.0)));
}

#[test]
fn rotate_on_world_axis_accumulates() {
    let mut t = Transform::new();
    t.rotate_on_world_axis(Vec3::Y, 10_f32.to_radians());
    t.rotate_on_world_axis(Vec3::Y, 10_f32.to_radians());
    let expected = Quat::from_rotation_y(20_f32.to_radians());
    assert!(t.rotation.angle_between(expected) < 1e-4);

    t.rotate_on_world_axis(Vec3::Y, -20_f32.to_radians());
    assert!(t.rotation.angle_between(Quat::IDENTITY) < 1e-4);
}

#[test]
fn rotate_on_world_axis_differs_from_local_when_tilted() {
    let mut world = Transform::new();
    world.rotation = Quat::from_rotation_x(FRAC_PI_4);
    let mut local = world.clone();

    world.rotate_on_world_axis(Vec3::Y, FRAC_PI_2);
    local.rotate_on_axis(Vec3::Y, FRAC_PI_2);
    assert!(world.rotation.angle_between(local.rotation) > 1e-3);
}

#[test]
fn look_at_points_negative_z_at_target() {
    let mut t = Transform::from_position(Vec3::new(0.0, 0.0, 5.0));
    t.look_at(Vec3::new(5.0, 0.0, 5.0), Vec3::Y);
    let forward = t.rotation * Vec3::NEG_Z;
    assert!(vec3_approx(forward, Vec3::X));
}

#[test]
fn look_at_parallel_to_up_is_ignored() {
    let mut t = Transform::new();
    t.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
    assert_eq!(t.rotation, Quat::IDENTITY);
}

#[test]
fn apply_local_matrix_decomposes_trs() {
    let mat = Mat4::from_scale_rotation_translation(
        Vec3::splat(2.0),
        Quat::from_rotation_z(FRAC_PI_4),
        Vec3::new(1.0, -1.0, 3.0),
    );
    let mut t = Transform::new();
    t.apply_local_matrix(mat);
    assert!(vec3_approx(t.scale, Vec3::splat(2.0)));
    assert!(vec3_approx(t.position, Vec3::new(1.0, -1.0, 3.0)));
    assert!(t.rotation.angle_between(Quat::from_rotation_z(FRAC_PI_4)) < 1e-4);
}

// ============================================================================
// Hierarchy propagation
// ============================================================================

#[test]
fn world_matrix_combines_parent_and_child() {
    let mut scene = Scene::new();
    let mut parent = Node::new("Parent");
    parent.transform.position = Vec3::new(1.0, 0.0, 0.0);
    parent.transform.scale = Vec3::splat(2.0);
    let parent = scene.add_node(parent);

    let mut child = Node::new("Child");
    child.transform.position = Vec3::new(0.0, 1.0, 0.0);
    let child = scene.add_to_parent(child, parent);

    scene.update_matrix_world();
    let world = scene.get_node(child).unwrap().transform.world_position();
    assert!(vec3_approx(world, Vec3::new(1.0, 2.0, 0.0)));
}

#[test]
fn world_matrix_follows_parent_moves() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("Parent"));
    let child = scene.add_to_parent(Node::new("Child"), parent);
    scene.update_matrix_world();

    scene.get_node_mut(parent).unwrap().transform.position = Vec3::new(0.0, 0.0, -4.0);
    scene.update_matrix_world();
    let world = scene.get_node(child).unwrap().transform.world_position();
    assert!(vec3_approx(world, Vec3::new(0.0, 0.0, -4.0)));
}

#[test]
fn hidden_parent_hides_subtree() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("Parent"));
    let child = scene.add_to_parent(Node::new("Child"), parent);

    scene.get_node_mut(parent).unwrap().visible = false;
    scene.update_matrix_world();
    assert!(!scene.get_node(child).unwrap().is_world_visible());

    scene.get_node_mut(parent).unwrap().visible = true;
    scene.update_matrix_world();
    assert!(scene.get_node(child).unwrap().is_world_visible());
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn camera_stores_fov_in_radians() {
    let camera = Camera::new_perspective(75.0, 16.0 / 9.0, 0.1, 1000.0);
    assert!(approx_eq(camera.fov, 75_f32.to_radians()));
}

#[test]
fn camera_set_aspect_updates_projection() {
    let mut camera = Camera::new_perspective(75.0, 1.0, 0.1, 1000.0);
    let before = camera.projection_matrix();
    camera.set_aspect(2.0);
    assert_ne!(before, camera.projection_matrix());
    assert!(approx_eq(camera.projection_matrix().x_axis.x * 2.0, before.x_axis.x));
}

#[test]
fn camera_forward_is_negative_z_by_default() {
    assert!(vec3_approx(Camera::forward(&Affine3A::IDENTITY), Vec3::NEG_Z));
}

#[test]
fn view_projection_maps_point_in_front_into_clip_volume() {
    let camera = Camera::new_perspective(75.0, 1.0, 0.1, 1000.0);
    let world = Affine3A::from_translation(Vec3::new(0.0, 0.0, 5.0));
    let clip = camera.view_projection(&world) * Vec3::ZERO.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(approx_eq(ndc.x, 0.0) && approx_eq(ndc.y, 0.0));
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

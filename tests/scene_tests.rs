//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: add/remove nodes, attach/detach hierarchy
//! - Component management: meshes, cameras, active camera
//! - Node query: names, root_nodes
//! - Visible mesh collection

use glam::Vec3;
use myth_playground::assets::AssetServer;
use myth_playground::resources::{Color, Geometry, Material, Mesh};
use myth_playground::scene::{AmbientLight, Background, Camera, Node, NodeHandle, Scene};

fn unit_mesh(assets: &mut AssetServer) -> Mesh {
    let geometry = assets.add_geometry(Geometry::new_box(1.0, 1.0, 1.0));
    let material = assets.add_material(Material::basic(Color::WHITE));
    Mesh::new(geometry, material)
}

fn visible_handles(scene: &Scene) -> Vec<NodeHandle> {
    scene.visible_meshes().map(|(h, _, _)| h).collect()
}

// ============================================================================
// Node Creation & Removal
// ============================================================================

#[test]
fn scene_add_node_to_root() {
    let mut scene = Scene::new();
    let handle = scene.add_node(Node::new("Root"));
    assert!(scene.root_nodes.contains(&handle));
    assert_eq!(scene.get_node(handle).unwrap().name, "Root");
}

#[test]
fn scene_add_to_parent_links_both_sides() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("Parent"));
    let child = scene.add_to_parent(Node::new("Child"), parent);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert_eq!(scene.get_node(parent).unwrap().children(), &[child]);
    assert!(!scene.root_nodes.contains(&child));
}

#[test]
fn scene_add_to_missing_parent_falls_back_to_root() {
    let mut scene = Scene::new();
    let ghost = scene.add_node(Node::new("Ghost"));
    scene.remove_node(ghost);

    let orphan = scene.add_to_parent(Node::new("Orphan"), ghost);
    assert!(scene.root_nodes.contains(&orphan));
    assert_eq!(scene.get_node(orphan).unwrap().parent(), None);
}

#[test]
fn scene_remove_node_removes_subtree_and_components() {
    let mut assets = AssetServer::new();
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("Parent"));
    let child = scene.add_mesh_to_parent(Node::new("Child"), unit_mesh(&mut assets), parent);
    let grandchild = scene.add_to_parent(Node::new("Grandchild"), child);

    scene.remove_node(parent);

    assert!(scene.get_node(parent).is_none());
    assert!(scene.get_node(child).is_none());
    assert!(scene.get_node(grandchild).is_none());
    assert!(scene.get_mesh(child).is_none());
    assert!(!scene.root_nodes.contains(&parent));
}

#[test]
fn scene_attach_reparents() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("A"));
    let b = scene.add_node(Node::new("B"));
    let child = scene.add_to_parent(Node::new("Child"), a);

    scene.attach(child, b);
    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[child]);
}

#[test]
fn scene_attach_to_self_is_ignored() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("A"));
    scene.attach(a, a);
    assert!(scene.root_nodes.contains(&a));
    assert_eq!(scene.get_node(a).unwrap().parent(), None);
}

#[test]
fn scene_detach_makes_root() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("Parent"));
    let child = scene.add_to_parent(Node::new("Child"), parent);

    scene.detach(child);
    assert!(scene.root_nodes.contains(&child));
    assert_eq!(scene.get_node(child).unwrap().parent(), None);
}

#[test]
fn scene_find_node_by_name_searches_depth_first() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("Duck"));
    let child = scene.add_to_parent(Node::new("Beak"), parent);

    assert_eq!(scene.find_node_by_name("Beak"), Some(child));
    assert_eq!(scene.find_node_by_name("Wing"), None);
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn scene_first_camera_becomes_active() {
    let mut scene = Scene::new();
    let first = scene.add_camera(Camera::new_perspective(75.0, 1.0, 0.1, 1000.0), Vec3::new(0.0, 0.0, 5.0));
    let _second = scene.add_camera(Camera::new_perspective(50.0, 1.0, 0.1, 100.0), Vec3::ZERO);
    assert_eq!(scene.active_camera, Some(first));

    scene.update_matrix_world();
    let (camera, world) = scene.active_camera().unwrap();
    assert!((camera.fov - 75_f32.to_radians()).abs() < 1e-6);
    assert_eq!(Vec3::from(world.translation), Vec3::new(0.0, 0.0, 5.0));
}

#[test]
fn scene_removing_active_camera_clears_it() {
    let mut scene = Scene::new();
    let cam = scene.add_camera(Camera::new_perspective(75.0, 1.0, 0.1, 1000.0), Vec3::ZERO);
    scene.remove_node(cam);
    assert!(scene.active_camera.is_none());
    assert!(scene.active_camera().is_none());
}

#[test]
fn scene_defaults() {
    let scene = Scene::new();
    assert_eq!(scene.background, Background::Color(Color::BLACK));
    assert!(scene.ambient_light.is_none());
    assert!(scene.background.cube_map().is_none());
}

#[test]
fn ambient_light_from_hex() {
    let light = AmbientLight::new(0xbbbbbb);
    assert_eq!(light.color.to_hex(), 0xbbbbbb);
    assert!((light.intensity - 1.0).abs() < f32::EPSILON);
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn visible_meshes_skip_hidden_nodes() {
    let mut assets = AssetServer::new();
    let mut scene = Scene::new();
    let shown = scene.add_mesh("Shown", unit_mesh(&mut assets));
    let hidden = scene.add_mesh("Hidden", unit_mesh(&mut assets));

    scene.get_node_mut(hidden).unwrap().visible = false;
    scene.update_matrix_world();

    let visible = visible_handles(&scene);
    assert!(visible.contains(&shown));
    assert!(!visible.contains(&hidden));
}

#[test]
fn visible_meshes_skip_hidden_ancestors() {
    let mut assets = AssetServer::new();
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("Model"));
    let part = scene.add_mesh_to_parent(Node::new("Part"), unit_mesh(&mut assets), root);

    scene.get_node_mut(root).unwrap().visible = false;
    scene.update_matrix_world();
    assert!(visible_handles(&scene).is_empty());

    scene.get_node_mut(root).unwrap().visible = true;
    scene.update_matrix_world();
    assert_eq!(visible_handles(&scene), vec![part]);
}

//! End-to-end demo tests
//!
//! Each demo is set up on an engine without a GPU and an asset root that
//! does not exist, then ticked the way the render loop would tick it.
//!
//! Tests for:
//! - Showcase: GUI params applied to meshes, missing assets tolerated,
//!   a loaded duck following `visible_duck`
//! - Animation commands through Demo::dispatch
//! - Transform: position sliders and world-Y rotation commands
//! - Shadertoy: uniforms follow time and surface size

use glam::{Quat, Vec2, Vec3};
use myth_playground::assets::AssetServer;
use myth_playground::demos::{
    AnimationDemo, CameraRig, Command, Demo, ShadertoyDemo, ShowcaseDemo, TransformDemo,
};
use myth_playground::demos::showcase::DUCK_MODEL;
use myth_playground::engine::{Engine, FrameState};
use myth_playground::renderer::RenderSettings;
use myth_playground::resources::{Color, MaterialKind};
use myth_playground::scene::{Background, NodeHandle};
use myth_playground::AnimationState;

// ============================================================================
// Harness
// ============================================================================

fn headless_engine() -> Engine {
    let root = std::env::temp_dir().join("myth-playground-no-assets-here");
    Engine::with_assets(RenderSettings::default(), AssetServer::with_root(root))
}

/// Engine whose asset root holds a small duck model at the showcase path.
fn engine_with_duck(name: &str) -> Engine {
    let root = std::env::temp_dir().join(format!("myth-playground-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&root);
    let model = root.join(DUCK_MODEL);
    std::fs::create_dir_all(model.parent().unwrap()).unwrap();
    std::fs::write(&model, DUCK_GLTF).unwrap();
    Engine::with_assets(RenderSettings::default(), AssetServer::with_root(root))
}

/// One triangle on node "Body" with an empty child "Beak".
const DUCK_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [{ "nodes": [0] }],
    "nodes": [
        { "name": "Body", "mesh": 0, "children": [1] },
        { "name": "Beak" }
    ],
    "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
    "buffers": [{
        "byteLength": 36,
        "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
    }],
    "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
    "accessors": [{
        "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
        "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
    }]
}"#;

/// Ticks until the background model load settles.
fn tick_until_settled(demo: &mut ShowcaseDemo, engine: &mut Engine) {
    for _ in 0..400 {
        tick(demo, engine, 0.016);
        if !demo.duck_state().is_pending() {
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
}

/// One frame: demo tick, then the engine's transform propagation.
fn tick<D: Demo>(demo: &mut D, engine: &mut Engine, dt: f32) {
    let frame = FrameState {
        time: engine.time() + dt,
        dt,
        frame_count: engine.frame_count(),
    };
    demo.tick(engine, &frame);
    engine.update(dt);
}

fn visible(engine: &Engine, node: NodeHandle) -> bool {
    engine.scene.get_node(node).unwrap().is_world_visible()
}

fn position(engine: &Engine, node: NodeHandle) -> Vec3 {
    engine.scene.get_node(node).unwrap().transform.position
}

// ============================================================================
// Showcase
// ============================================================================

#[test]
fn showcase_hidden_cube_stays_hidden_without_model() {
    let mut engine = headless_engine();
    let mut demo = ShowcaseDemo::setup(&mut engine).unwrap();

    demo.params.visible_cube = false;
    tick(&mut demo, &mut engine, 1.0 / 60.0);

    assert!(!visible(&engine, demo.cube()));
    assert!(visible(&engine, demo.shader_cube()));
    assert!(demo.duck().is_none());
}

#[test]
fn showcase_falls_back_to_solid_background() {
    let mut engine = headless_engine();
    let _demo = ShowcaseDemo::setup(&mut engine).unwrap();
    assert!(matches!(engine.scene.background, Background::Color(_)));
    assert!(engine.scene.ambient_light.is_some());
}

#[test]
fn showcase_shader_cube_sits_at_x_two() {
    let mut engine = headless_engine();
    let demo = ShowcaseDemo::setup(&mut engine).unwrap();
    assert_eq!(position(&engine, demo.shader_cube()), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn showcase_color_param_reaches_material() {
    let mut engine = headless_engine();
    let mut demo = ShowcaseDemo::setup(&mut engine).unwrap();

    demo.params.color = 0x3366ff;
    tick(&mut demo, &mut engine, 0.016);

    let mesh = engine.scene.get_mesh(demo.cube()).unwrap();
    let material = engine.assets.get_material(mesh.material).unwrap();
    assert_eq!(material.color(), Some(Color::from_hex(0x3366ff)));
}

#[test]
fn showcase_duck_failure_is_recorded() {
    let mut engine = headless_engine();
    let mut demo = ShowcaseDemo::setup(&mut engine).unwrap();

    for _ in 0..200 {
        tick(&mut demo, &mut engine, 0.016);
        if !demo.duck_state().is_pending() {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    assert!(demo.duck_state().error().is_some());
    assert!(demo.duck().is_none());
    // later ticks keep running with the failed state
    tick(&mut demo, &mut engine, 0.016);
}

#[test]
fn showcase_loaded_duck_follows_visibility_param() {
    let mut engine = engine_with_duck("duck-visible");
    let mut demo = ShowcaseDemo::setup(&mut engine).unwrap();

    tick_until_settled(&mut demo, &mut engine);
    let root = demo.duck().expect("duck should be added once loaded");
    assert!(demo.duck_state().ready().is_some());
    let body = engine.scene.find_node_by_name("Body").unwrap();
    let beak = engine.scene.find_node_by_name("Beak").unwrap();
    assert!(visible(&engine, root));
    assert!(visible(&engine, body));

    demo.params.visible_duck = false;
    tick(&mut demo, &mut engine, 0.016);
    assert!(!engine.scene.get_node(root).unwrap().visible);
    assert!(!visible(&engine, body));
    assert!(!visible(&engine, beak));
    // the cube is driven by its own param
    assert!(visible(&engine, demo.cube()));

    demo.params.visible_duck = true;
    tick(&mut demo, &mut engine, 0.016);
    assert!(visible(&engine, beak));
}

#[test]
fn showcase_duck_added_only_once() {
    let mut engine = engine_with_duck("duck-once");
    let mut demo = ShowcaseDemo::setup(&mut engine).unwrap();

    tick_until_settled(&mut demo, &mut engine);
    let root = demo.duck().unwrap();
    let nodes = engine.scene.nodes.len();
    for _ in 0..3 {
        tick(&mut demo, &mut engine, 0.016);
    }
    assert_eq!(demo.duck(), Some(root));
    assert_eq!(engine.scene.nodes.len(), nodes);
}

#[test]
fn showcase_play_command_moves_cube() {
    let mut engine = headless_engine();
    let mut demo = ShowcaseDemo::setup(&mut engine).unwrap();

    demo.dispatch(Command::PlayAnimation, &mut engine);
    tick(&mut demo, &mut engine, 1.5);
    assert_eq!(demo.animation().state(), AnimationState::Playing);
    let p = position(&engine, demo.cube());
    assert!(p.x > 1.0 && p.x < 2.0);

    demo.dispatch(Command::StopAnimation, &mut engine);
    tick(&mut demo, &mut engine, 0.5);
    assert_eq!(demo.animation().state(), AnimationState::Idle);
    assert_eq!(position(&engine, demo.cube()), Vec3::ZERO);
}

#[test]
fn showcase_ignores_rotation_commands() {
    let mut engine = headless_engine();
    let mut demo = ShowcaseDemo::setup(&mut engine).unwrap();
    demo.dispatch(Command::RotateY(10.0), &mut engine);
    assert_eq!(engine.scene.get_node(demo.cube()).unwrap().transform.rotation, Quat::IDENTITY);
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn animation_demo_finishes_at_origin() {
    let mut engine = headless_engine();
    let mut demo = AnimationDemo::setup(&mut engine).unwrap();

    demo.dispatch(Command::PlayAnimation, &mut engine);
    for _ in 0..4 {
        tick(&mut demo, &mut engine, 1.0);
    }
    assert_eq!(demo.animation().state(), AnimationState::Idle);
    assert_eq!(position(&engine, demo.cube()), Vec3::ZERO);
}

#[test]
fn animation_demo_visibility_toggles() {
    let mut engine = headless_engine();
    let mut demo = AnimationDemo::setup(&mut engine).unwrap();

    demo.params.visible = false;
    tick(&mut demo, &mut engine, 0.016);
    assert!(!visible(&engine, demo.cube()));

    demo.params.visible = true;
    tick(&mut demo, &mut engine, 0.016);
    assert!(visible(&engine, demo.cube()));
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn transform_params_position_cube() {
    let mut engine = headless_engine();
    let mut demo = TransformDemo::setup(&mut engine).unwrap();

    demo.params.x = 12.5;
    demo.params.y = -3.0;
    demo.params.z = 100.0;
    tick(&mut demo, &mut engine, 0.016);

    let world = engine.scene.get_node(demo.cube()).unwrap().transform.world_position();
    assert_eq!(world, Vec3::new(12.5, -3.0, 100.0));
}

#[test]
fn transform_rotation_commands_turn_about_world_y() {
    let mut engine = headless_engine();
    let mut demo = TransformDemo::setup(&mut engine).unwrap();

    demo.dispatch(Command::RotateY(10.0), &mut engine);
    demo.dispatch(Command::RotateY(10.0), &mut engine);
    let rotation = engine.scene.get_node(demo.cube()).unwrap().transform.rotation;
    assert!(rotation.angle_between(Quat::from_rotation_y(20_f32.to_radians())) < 1e-4);

    demo.dispatch(Command::RotateY(-20.0), &mut engine);
    let rotation = engine.scene.get_node(demo.cube()).unwrap().transform.rotation;
    assert!(rotation.angle_between(Quat::IDENTITY) < 1e-4);
}

#[test]
fn transform_position_survives_rotation() {
    let mut engine = headless_engine();
    let mut demo = TransformDemo::setup(&mut engine).unwrap();
    demo.params.x = 1.0;
    tick(&mut demo, &mut engine, 0.016);

    demo.dispatch(Command::RotateY(10.0), &mut engine);
    tick(&mut demo, &mut engine, 0.016);
    assert_eq!(position(&engine, demo.cube()), Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn transform_hidden_cube() {
    let mut engine = headless_engine();
    let mut demo = TransformDemo::setup(&mut engine).unwrap();

    demo.params.visible = false;
    tick(&mut demo, &mut engine, 0.016);
    assert!(!engine.scene.get_node(demo.cube()).unwrap().visible);
    assert!(!visible(&engine, demo.cube()));

    demo.params.visible = true;
    tick(&mut demo, &mut engine, 0.016);
    assert!(visible(&engine, demo.cube()));
}

#[test]
fn transform_color_param_reaches_material() {
    let mut engine = headless_engine();
    let mut demo = TransformDemo::setup(&mut engine).unwrap();

    let mesh = engine.scene.get_mesh(demo.cube()).unwrap();
    let material = engine.assets.get_material(mesh.material).unwrap();
    assert_eq!(material.color(), Some(Color::from_hex(0x44aa88)));

    demo.params.color = 0xff0000;
    tick(&mut demo, &mut engine, 0.016);

    let mesh = engine.scene.get_mesh(demo.cube()).unwrap();
    let material = engine.assets.get_material(mesh.material).unwrap();
    assert_eq!(material.color(), Some(Color::from_hex(0xff0000)));
}

#[test]
fn transform_without_skybox_images_skips_box() {
    let mut engine = headless_engine();
    let demo = TransformDemo::setup(&mut engine).unwrap();
    assert!(demo.skybox().is_none());
    assert_eq!(engine.scene.meshes.len(), 1);
}

// ============================================================================
// Shadertoy
// ============================================================================

#[test]
fn shadertoy_uses_gl_settings() {
    let settings = ShadertoyDemo::settings();
    assert_eq!(settings.backends, Some(wgpu::Backends::GL));
}

#[test]
fn shadertoy_uniforms_follow_time_and_size() {
    let mut engine = headless_engine();
    let mut demo = ShadertoyDemo::setup(&mut engine).unwrap();

    engine.resize(800, 600);
    tick(&mut demo, &mut engine, 0.5);

    let material = engine.assets.get_material(demo.material()).unwrap();
    let MaterialKind::Shader(shader) = &material.kind else {
        panic!("expected a shader material");
    };
    assert_eq!(shader.uniforms.time, 0.5);
    assert_eq!(shader.uniforms.resolution, Vec2::new(800.0, 600.0));
}

#[test]
fn shadertoy_hidden_cube() {
    let mut engine = headless_engine();
    let mut demo = ShadertoyDemo::setup(&mut engine).unwrap();
    demo.params.visible = false;
    tick(&mut demo, &mut engine, 0.016);
    assert!(!visible(&engine, demo.cube()));
}

// ============================================================================
// Camera rig
// ============================================================================

#[test]
fn camera_rig_matches_demo_camera() {
    let mut engine = headless_engine();
    let mut rig = CameraRig::new(&mut engine.scene, 16.0 / 9.0);
    assert_eq!(engine.scene.active_camera, Some(rig.node));

    rig.update(&mut engine, 0.016);
    engine.update(0.016);
    let (camera, world) = engine.scene.active_camera().unwrap();
    assert!((camera.fov - 75_f32.to_radians()).abs() < 1e-6);
    assert!((camera.near - 0.1).abs() < 1e-6);
    assert!((camera.far - 1000.0).abs() < 1e-3);
    assert!((Vec3::from(world.translation) - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-3);
}

//! The four playground demos and the harness they share.
//!
//! Each demo is a plain state struct implementing [`Demo`]. [`DemoApp`] wraps
//! one in an [`AppHandler`] that adds the camera rig, the GUI panel and the
//! stats overlay, so a demo only builds its scene, reacts to [`Command`]s and
//! syncs its parameters in [`Demo::tick`].
//!
//! | Demo | Module |
//! |------|--------|
//! | Skybox, env-mapped cube, keyframe animation, pulse shader, duck model | [`showcase`] |
//! | Cube positioned and rotated from the panel inside a box skybox | [`transform`] |
//! | Keyframe cube with helpers | [`animation`] |
//! | Resolution-aware gradient shader on the GL backend | [`shadertoy`] |
//!
//! Keyboard shortcuts mirror the panel buttons: `P` plays, `R` stops,
//! `←` / `→` rotate by 10°.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::app::AppHandler;
use crate::assets::{AssetServer, MaterialHandle, TextureHandle};
use crate::engine::{Engine, FrameState};
use crate::errors::{Error, Result};
use crate::renderer::{FrameComposer, RenderSettings};
use crate::resources::{Geometry, Key, Material, Mesh};
use crate::scene::{Camera, NodeHandle, Scene};
use crate::ui::{Stats, UiPass};
use crate::utils::OrbitControls;

pub mod animation;
pub mod shadertoy;
pub mod showcase;
pub mod transform;

pub use animation::AnimationDemo;
pub use shadertoy::ShadertoyDemo;
pub use showcase::ShowcaseDemo;
pub use transform::TransformDemo;

/// Vertical field of view of every demo camera, in degrees.
pub const CAMERA_FOV: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Angle applied by one rotate command, in degrees.
pub const ROTATION_STEP_DEGREES: f32 = 10.0;

/// Cube face suffixes in the `+X, -X, +Y, -Y, +Z, -Z` slots of a cube texture.
const SKYBOX_FACES: [&str; 6] = ["ft", "bk", "up", "dn", "rt", "lf"];

/// A click or key command from the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    PlayAnimation,
    StopAnimation,
    /// Rotation about the world Y axis, in degrees.
    RotateY(f32),
}

/// One playground demo.
pub trait Demo: Sized + 'static {
    const TITLE: &'static str;

    fn settings() -> RenderSettings {
        RenderSettings::default()
    }

    /// Builds the scene. The camera rig already exists.
    fn setup(engine: &mut Engine) -> Result<Self>;

    /// Per-frame work before camera controls and rendering.
    fn tick(&mut self, engine: &mut Engine, frame: &FrameState);

    /// Draws the parameter widgets; buttons push commands.
    fn ui(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>);

    /// Commands a demo has no use for are ignored.
    fn dispatch(&mut self, command: Command, engine: &mut Engine);
}

// ============================================================================
// Camera
// ============================================================================

/// Perspective camera at `z = 5` with orbit controls around the origin.
pub struct CameraRig {
    pub node: NodeHandle,
    controls: OrbitControls,
}

impl CameraRig {
    pub fn new(scene: &mut Scene, aspect: f32) -> Self {
        let camera = Camera::new_perspective(CAMERA_FOV, aspect, CAMERA_NEAR, CAMERA_FAR);
        let node = scene.add_camera(camera, CAMERA_POSITION);
        scene.active_camera = Some(node);

        Self {
            node,
            controls: OrbitControls::new(CAMERA_POSITION, Vec3::ZERO),
        }
    }

    pub fn update(&mut self, engine: &mut Engine, dt: f32) {
        if let Some((transform, camera)) = engine.scene.active_camera_bundle() {
            self.controls.update(transform, &engine.input, camera.fov, dt);
        }
    }
}

// ============================================================================
// Scene helpers
// ============================================================================

/// Adds the axes (10) and grid (20 x 20) helpers.
pub fn add_helpers(engine: &mut Engine) {
    let axes = engine.assets.add_geometry(Geometry::new_axes(10.0));
    let grid = engine.assets.add_geometry(Geometry::new_grid(20.0, 20));
    let line = engine.assets.add_material(Material::line().with_name("Helper Lines"));

    engine.scene.add_mesh("Axes", Mesh::new(axes, line));
    engine.scene.add_mesh("Grid", Mesh::new(grid, line));
}

/// Adds a unit cube with `material` as a root node.
pub fn add_cube(engine: &mut Engine, name: &'static str, material: Material) -> (NodeHandle, MaterialHandle) {
    let geometry = engine.assets.add_geometry(Geometry::new_box(1.0, 1.0, 1.0));
    let material = engine.assets.add_material(material);
    let node = engine.scene.add_mesh(name, Mesh::new(geometry, material));
    (node, material)
}

/// Loads `images/{prefix}_{ft,bk,up,dn,rt,lf}.jpg` as a cube texture.
///
/// Failures are logged once; the caller keeps a solid background.
pub fn load_skybox(assets: &mut AssetServer, prefix: &str) -> Option<TextureHandle> {
    let paths = SKYBOX_FACES.map(|face| format!("images/{prefix}_{face}.jpg"));
    let uris: [&str; 6] = std::array::from_fn(|i| paths[i].as_str());

    match assets.load_cube_texture(uris) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("Skybox '{prefix}' unavailable, using a solid background: {e}");
            None
        }
    }
}

pub fn set_visible(scene: &mut Scene, node: NodeHandle, visible: bool) {
    if let Some(node) = scene.get_node_mut(node) {
        node.visible = visible;
    }
}

/// Writes a packed `0xRRGGBB` color into a material.
pub fn set_color(assets: &mut AssetServer, material: MaterialHandle, hex: u32) {
    if let Some(color) = assets.get_material_mut(material).and_then(Material::color_mut) {
        color.set_hex(hex);
    }
}

/// Pushes this frame's time and surface size into a shader material.
pub fn update_shader_uniforms(engine: &mut Engine, material: MaterialHandle, time: f32) {
    let (width, height) = engine.size();
    let resolution = Vec2::new(width as f32, height as f32);
    if let Some(shader) = engine.assets.get_material_mut(material).and_then(Material::as_shader_mut) {
        shader.set_uniforms(time, resolution);
    }
}

pub fn rotate_y(scene: &mut Scene, node: NodeHandle, degrees: f32) {
    if let Some(node) = scene.get_node_mut(node) {
        node.transform.rotate_on_world_axis(Vec3::Y, degrees.to_radians());
    }
}

/// Play and stop buttons.
pub fn animation_buttons(ui: &mut egui::Ui, commands: &mut Vec<Command>) {
    ui.horizontal(|ui| {
        if ui.button("▶ Play").clicked() {
            commands.push(Command::PlayAnimation);
        }
        if ui.button("■ Stop").clicked() {
            commands.push(Command::StopAnimation);
        }
    });
}

/// Rotate left / right buttons.
pub fn rotation_buttons(ui: &mut egui::Ui, commands: &mut Vec<Command>) {
    ui.horizontal(|ui| {
        if ui.button("⟲ -10°").clicked() {
            commands.push(Command::RotateY(-ROTATION_STEP_DEGREES));
        }
        if ui.button("⟳ +10°").clicked() {
            commands.push(Command::RotateY(ROTATION_STEP_DEGREES));
        }
    });
}

// ============================================================================
// Application wrapper
// ============================================================================

/// Runs a [`Demo`] inside the winit application framework.
pub struct DemoApp<D: Demo> {
    demo: D,
    rig: CameraRig,
    ui_pass: UiPass,
    stats: Stats,
    commands: Vec<Command>,
    adapter: String,
}

impl<D: Demo> DemoApp<D> {
    fn keyboard_commands(&mut self, engine: &Engine) {
        let input = &engine.input;
        let bindings = [
            (Key::P, Command::PlayAnimation),
            (Key::R, Command::StopAnimation),
            (Key::ArrowLeft, Command::RotateY(-ROTATION_STEP_DEGREES)),
            (Key::ArrowRight, Command::RotateY(ROTATION_STEP_DEGREES)),
        ];
        for (key, command) in bindings {
            if input.get_key_down(key) {
                self.commands.push(command);
            }
        }
    }

    fn draw_ui(&mut self, window: &Window) {
        self.ui_pass.begin_frame(window);
        let ctx = self.ui_pass.context().clone();

        self.stats.show(&ctx);
        egui::Window::new(D::TITLE)
            .default_pos([10.0, 90.0])
            .default_width(260.0)
            .show(&ctx, |ui| {
                self.demo.ui(ui, &mut self.commands);
                ui.separator();
                ui.weak(&self.adapter);
            });

        self.ui_pass.end_frame(window);
    }
}

impl<D: Demo> AppHandler for DemoApp<D> {
    fn init(engine: &mut Engine, window: &Arc<Window>) -> Result<Self> {
        let wgpu_ctx = engine.renderer.context().ok_or(Error::RendererNotInitialized)?;
        let ui_pass = UiPass::new(&wgpu_ctx.device, wgpu_ctx.color_format(), window);
        let adapter = format!(
            "{} ({:?})",
            wgpu_ctx.adapter_info.name, wgpu_ctx.adapter_info.backend
        );

        let (width, height) = engine.size();
        let rig = CameraRig::new(&mut engine.scene, width as f32 / height.max(1) as f32);
        let demo = D::setup(engine)?;

        log::info!("{} ready", D::TITLE);
        Ok(Self {
            demo,
            rig,
            ui_pass,
            stats: Stats::new(),
            commands: Vec::new(),
            adapter,
        })
    }

    fn on_event(&mut self, _engine: &mut Engine, window: &Arc<Window>, event: &WindowEvent) -> bool {
        if self.ui_pass.handle_input(window, event) {
            return true;
        }

        match event {
            WindowEvent::Resized(size) => {
                self.ui_pass
                    .resize(size.width, size.height, window.scale_factor() as f32);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = window.inner_size();
                self.ui_pass.resize(size.width, size.height, *scale_factor as f32);
            }
            _ => {}
        }
        false
    }

    fn update(&mut self, engine: &mut Engine, window: &Arc<Window>, frame: &FrameState) {
        self.stats.begin();

        self.keyboard_commands(engine);
        for command in std::mem::take(&mut self.commands) {
            self.demo.dispatch(command, engine);
        }

        self.demo.tick(engine, frame);

        engine.input.set_pointer_captured(self.ui_pass.wants_pointer_input());
        self.rig.update(engine, frame.dt);

        self.draw_ui(window);
    }

    fn compose_frame<'a>(&'a mut self, composer: FrameComposer<'a>) {
        let Self { ui_pass, stats, .. } = self;
        composer.add_node(ui_pass).render();
        stats.end();
    }
}

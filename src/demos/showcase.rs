//! Showcase: everything at once.
//!
//! Ambient light, axes and grid helpers, the miramar cube map as background,
//! an env-mapped cube driven by a keyframe animation, a pulsing shader cube
//! and the duck model loaded in the background.

use crate::animation::KeyframeAnimation;
use crate::assets::{LoadState, MaterialHandle, Prefab};
use crate::demos::{self, Command, Demo};
use crate::engine::{Engine, FrameState};
use crate::errors::Result;
use crate::resources::{Color, Material, ShaderMaterial};
use crate::scene::{AmbientLight, Background, NodeHandle};
use crate::ui::panel;

pub const DUCK_MODEL: &str = "models/duck.glb";

/// Background used when the cube map cannot be loaded.
const FALLBACK_BACKGROUND: u32 = 0x1d2330;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowcaseParams {
    pub visible_cube: bool,
    pub visible_duck: bool,
    /// Packed `0xRRGGBB`.
    pub color: u32,
}

impl Default for ShowcaseParams {
    fn default() -> Self {
        Self {
            visible_cube: true,
            visible_duck: true,
            color: 0xffffff,
        }
    }
}

pub struct ShowcaseDemo {
    pub params: ShowcaseParams,

    cube: NodeHandle,
    cube_material: MaterialHandle,
    animation: KeyframeAnimation,

    shader_cube: NodeHandle,
    shader_material: MaterialHandle,

    duck: LoadState<Prefab>,
    duck_node: Option<NodeHandle>,
}

impl ShowcaseDemo {
    #[must_use]
    pub fn cube(&self) -> NodeHandle {
        self.cube
    }

    #[must_use]
    pub fn shader_cube(&self) -> NodeHandle {
        self.shader_cube
    }

    /// Root node of the duck, once it has been loaded and added.
    #[must_use]
    pub fn duck(&self) -> Option<NodeHandle> {
        self.duck_node
    }

    #[must_use]
    pub fn duck_state(&self) -> &LoadState<Prefab> {
        &self.duck
    }

    #[must_use]
    pub fn animation(&self) -> &KeyframeAnimation {
        &self.animation
    }

    fn poll_duck(&mut self, engine: &mut Engine) {
        if !self.duck.poll() {
            return;
        }
        match &self.duck {
            LoadState::Ready(prefab) => {
                let root = prefab.instantiate(&mut engine.scene, &mut engine.assets);
                log::info!("Duck model added ({} primitives)", prefab.primitive_count());
                self.duck_node = Some(root);
            }
            LoadState::Failed(e) => log::error!("Failed to load {DUCK_MODEL}: {e}"),
            LoadState::Pending(_) => {}
        }
    }
}

impl Demo for ShowcaseDemo {
    const TITLE: &'static str = "Showcase";

    fn setup(engine: &mut Engine) -> Result<Self> {
        let params = ShowcaseParams::default();

        engine.scene.ambient_light = Some(AmbientLight::new(0xbbbbbb));
        demos::add_helpers(engine);

        let sky = demos::load_skybox(&mut engine.assets, "skybox/miramar");
        engine.scene.background = match sky {
            Some(handle) => Background::CubeMap(handle),
            None => Background::Color(Color::from_hex(FALLBACK_BACKGROUND)),
        };

        let material = Material::basic(Color::from_hex(params.color))
            .with_name("Moving Cube")
            .with_env_map(sky);
        let (cube, cube_material) = demos::add_cube(engine, "Moving Cube", material);
        let animation = KeyframeAnimation::new(cube)?;

        let material = Material::shader(ShaderMaterial::pulse()).with_name("Pulse");
        let (shader_cube, shader_material) = demos::add_cube(engine, "Shader Cube", material);
        if let Some(node) = engine.scene.get_node_mut(shader_cube) {
            node.transform.translate_x(2.0);
        }

        let duck = engine.assets.load_gltf_async(DUCK_MODEL);

        Ok(Self {
            params,
            cube,
            cube_material,
            animation,
            shader_cube,
            shader_material,
            duck,
            duck_node: None,
        })
    }

    fn tick(&mut self, engine: &mut Engine, frame: &FrameState) {
        self.animation.update(frame.dt, &mut engine.scene);
        self.poll_duck(engine);

        if let Some(duck) = self.duck_node {
            demos::set_visible(&mut engine.scene, duck, self.params.visible_duck);
        }
        demos::set_visible(&mut engine.scene, self.cube, self.params.visible_cube);
        demos::set_color(&mut engine.assets, self.cube_material, self.params.color);

        demos::update_shader_uniforms(engine, self.shader_material, frame.time);
    }

    fn ui(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        ui.checkbox(&mut self.params.visible_cube, "visible_cube");
        ui.checkbox(&mut self.params.visible_duck, "visible_duck");
        panel::hex_color_edit(ui, "color", &mut self.params.color);

        ui.separator();
        demos::animation_buttons(ui, commands);
        ui.label(format!("animation: {:?}", self.animation.state()));
        panel::load_status(ui, "duck", &self.duck);
    }

    fn dispatch(&mut self, command: Command, engine: &mut Engine) {
        match command {
            Command::PlayAnimation => self.animation.play(&engine.scene),
            Command::StopAnimation => self.animation.stop(&mut engine.scene),
            Command::RotateY(_) => {}
        }
    }
}

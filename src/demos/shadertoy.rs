//! Shadertoy-style gradient on a cube.
//!
//! The fragment color depends on elapsed time and on the pixel position
//! normalized by the surface resolution, so resizing the window changes the
//! pattern. The renderer is created on the GL backend with WebGL2 limits.

use crate::assets::MaterialHandle;
use crate::demos::{self, Command, Demo};
use crate::engine::{Engine, FrameState};
use crate::errors::Result;
use crate::renderer::RenderSettings;
use crate::resources::{Material, ShaderMaterial};
use crate::scene::NodeHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadertoyParams {
    pub visible: bool,
}

impl Default for ShadertoyParams {
    fn default() -> Self {
        Self { visible: true }
    }
}

pub struct ShadertoyDemo {
    pub params: ShadertoyParams,
    cube: NodeHandle,
    material: MaterialHandle,
}

impl ShadertoyDemo {
    #[must_use]
    pub fn cube(&self) -> NodeHandle {
        self.cube
    }

    #[must_use]
    pub fn material(&self) -> MaterialHandle {
        self.material
    }
}

impl Demo for ShadertoyDemo {
    const TITLE: &'static str = "Shadertoy";

    fn settings() -> RenderSettings {
        RenderSettings::webgl2()
    }

    fn setup(engine: &mut Engine) -> Result<Self> {
        let material = Material::shader(ShaderMaterial::gradient()).with_name("Gradient");
        let (cube, material) = demos::add_cube(engine, "Gradient Cube", material);

        Ok(Self {
            params: ShadertoyParams::default(),
            cube,
            material,
        })
    }

    fn tick(&mut self, engine: &mut Engine, frame: &FrameState) {
        demos::set_visible(&mut engine.scene, self.cube, self.params.visible);
        demos::update_shader_uniforms(engine, self.material, frame.time);
    }

    fn ui(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        ui.checkbox(&mut self.params.visible, "visible");
        ui.separator();
        demos::rotation_buttons(ui, commands);
    }

    fn dispatch(&mut self, command: Command, engine: &mut Engine) {
        if let Command::RotateY(degrees) = command {
            demos::rotate_y(&mut engine.scene, self.cube, degrees);
        }
    }
}

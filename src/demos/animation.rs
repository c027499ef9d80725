//! Keyframe cube with play / stop.

use crate::animation::KeyframeAnimation;
use crate::assets::MaterialHandle;
use crate::demos::{self, Command, Demo};
use crate::engine::{Engine, FrameState};
use crate::errors::Result;
use crate::resources::{Color, Material};
use crate::scene::{AmbientLight, NodeHandle};
use crate::ui::panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationParams {
    pub visible: bool,
    pub color: u32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            visible: true,
            color: 0xff8844,
        }
    }
}

pub struct AnimationDemo {
    pub params: AnimationParams,
    cube: NodeHandle,
    material: MaterialHandle,
    animation: KeyframeAnimation,
}

impl AnimationDemo {
    #[must_use]
    pub fn cube(&self) -> NodeHandle {
        self.cube
    }

    #[must_use]
    pub fn animation(&self) -> &KeyframeAnimation {
        &self.animation
    }
}

impl Demo for AnimationDemo {
    const TITLE: &'static str = "Animation";

    fn setup(engine: &mut Engine) -> Result<Self> {
        let params = AnimationParams::default();

        engine.scene.ambient_light = Some(AmbientLight::new(0xbbbbbb));
        demos::add_helpers(engine);

        let material = Material::standard(Color::from_hex(params.color)).with_name("Animated Cube");
        let (cube, material) = demos::add_cube(engine, "Animated Cube", material);
        let animation = KeyframeAnimation::new(cube)?;

        Ok(Self {
            params,
            cube,
            material,
            animation,
        })
    }

    fn tick(&mut self, engine: &mut Engine, frame: &FrameState) {
        self.animation.update(frame.dt, &mut engine.scene);
        demos::set_visible(&mut engine.scene, self.cube, self.params.visible);
        demos::set_color(&mut engine.assets, self.material, self.params.color);
    }

    fn ui(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        ui.checkbox(&mut self.params.visible, "visible");
        panel::hex_color_edit(ui, "color", &mut self.params.color);

        ui.separator();
        demos::animation_buttons(ui, commands);
        ui.label(format!(
            "{:?} at {:.2}s",
            self.animation.state(),
            self.animation.time()
        ));
    }

    fn dispatch(&mut self, command: Command, engine: &mut Engine) {
        match command {
            Command::PlayAnimation => self.animation.play(&engine.scene),
            Command::StopAnimation => self.animation.stop(&mut engine.scene),
            Command::RotateY(_) => {}
        }
    }
}

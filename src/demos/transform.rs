//! Transform: a cube positioned from the panel inside a box skybox.
//!
//! The arid2 cube map is drawn on the inside of a 100³ box with an
//! env-mapped basic material, the way a scene without a background slot
//! would fake a skybox.

use glam::Vec3;

use crate::assets::MaterialHandle;
use crate::demos::{self, Command, Demo};
use crate::engine::{Engine, FrameState};
use crate::errors::Result;
use crate::resources::{Color, Geometry, Material, Mesh, Side};
use crate::scene::NodeHandle;
use crate::ui::panel;

/// Edge length of the skybox box.
pub const SKYBOX_SIZE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    pub visible: bool,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            visible: true,
            color: 0x44aa88,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl TransformParams {
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

pub struct TransformDemo {
    pub params: TransformParams,
    cube: NodeHandle,
    material: MaterialHandle,
    skybox: Option<NodeHandle>,
}

impl TransformDemo {
    #[must_use]
    pub fn cube(&self) -> NodeHandle {
        self.cube
    }

    #[must_use]
    pub fn skybox(&self) -> Option<NodeHandle> {
        self.skybox
    }
}

impl Demo for TransformDemo {
    const TITLE: &'static str = "Transform";

    fn setup(engine: &mut Engine) -> Result<Self> {
        let params = TransformParams::default();

        let skybox = demos::load_skybox(&mut engine.assets, "arid2").map(|texture| {
            let geometry = engine
                .assets
                .add_geometry(Geometry::new_box(SKYBOX_SIZE, SKYBOX_SIZE, SKYBOX_SIZE));
            let material = Material::basic(Color::WHITE)
                .with_name("Skybox")
                .with_env_map(Some(texture))
                .with_side(Side::Back);
            let material = engine.assets.add_material(material);
            engine.scene.add_mesh("Skybox", Mesh::new(geometry, material))
        });

        let material = Material::standard(Color::from_hex(params.color)).with_name("Cube");
        let (cube, material) = demos::add_cube(engine, "Cube", material);

        Ok(Self {
            params,
            cube,
            material,
            skybox,
        })
    }

    fn tick(&mut self, engine: &mut Engine, _frame: &FrameState) {
        if let Some(node) = engine.scene.get_node_mut(self.cube) {
            node.visible = self.params.visible;
            node.transform.position = self.params.position();
        }
        demos::set_color(&mut engine.assets, self.material, self.params.color);
    }

    fn ui(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        ui.checkbox(&mut self.params.visible, "visible");
        panel::hex_color_edit(ui, "color", &mut self.params.color);
        panel::position_slider(ui, "x", &mut self.params.x);
        panel::position_slider(ui, "y", &mut self.params.y);
        panel::position_slider(ui, "z", &mut self.params.z);

        ui.separator();
        demos::rotation_buttons(ui, commands);
    }

    fn dispatch(&mut self, command: Command, engine: &mut Engine) {
        if let Command::RotateY(degrees) = command {
            demos::rotate_y(&mut engine.scene, self.cube, degrees);
        }
    }
}

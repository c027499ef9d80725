pub mod color;
pub mod geometry;
pub mod input;
pub mod material;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use color::Color;
pub use geometry::{Geometry, Topology, Vertex};
pub use input::{ButtonState, Input, Key, MouseButton};
pub use material::{BasicMaterial, LineMaterial, Material, MaterialKind, Side, StandardMaterial};
pub use mesh::Mesh;
pub use shader::{ShaderMaterial, ShaderUniforms};
pub use texture::{Texture, TextureKind};

//! Scene Graph
//!
//! - [`Scene`]: node storage, mesh / camera components, background and ambient light
//! - [`Node`]: hierarchy, [`Transform`] and visibility
//! - [`Camera`]: perspective projection
//! - [`Background`] and [`AmbientLight`]

pub mod background;
pub mod camera;
pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;

pub use background::{AmbientLight, Background};
pub use camera::Camera;
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

slotmap::new_key_type! {
    /// Stable handle to a node in a [`Scene`].
    pub struct NodeHandle;
}

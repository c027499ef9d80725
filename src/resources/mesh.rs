use crate::assets::{GeometryHandle, MaterialHandle};

/// Geometry plus material, attached to a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mesh {
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self { geometry, material }
    }
}

pub mod gltf;
pub mod image;

pub use self::gltf::{GltfLoader, Prefab, PrefabMaterial, PrefabNode};

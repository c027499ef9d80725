//! Asset handles.
//!
//! Handles are slot map keys: cheap to copy, and a stale handle simply
//! resolves to `None`.

slotmap::new_key_type! {
    /// Handle to a [`Geometry`](crate::resources::Geometry) in the [`AssetServer`](super::AssetServer).
    pub struct GeometryHandle;
    /// Handle to a [`Material`](crate::resources::Material).
    pub struct MaterialHandle;
    /// Handle to a [`Texture`](crate::resources::Texture).
    pub struct TextureHandle;
}

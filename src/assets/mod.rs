//! Asset management
//!
//! - [`AssetServer`]: slot map storage for geometries, materials and textures
//! - [`io`]: where bytes come from ([`FileAssetReader`])
//! - [`loader`]: channel-delivered background loads ([`LoadState`])
//! - [`loaders`]: image and glTF decoding

pub mod handle;
pub mod io;
pub mod loader;
pub mod loaders;
pub mod server;

pub use handle::{GeometryHandle, MaterialHandle, TextureHandle};
pub use io::{ASSET_ROOT_ENV, AssetReader, FileAssetReader};
pub use loader::{LoadState, PendingAsset};
pub use loaders::{GltfLoader, Prefab};
pub use server::AssetServer;

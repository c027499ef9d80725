use std::path::PathBuf;
use std::sync::Arc;

use slotmap::SlotMap;

use crate::assets::handle::{GeometryHandle, MaterialHandle, TextureHandle};
use crate::assets::io::{AssetReader, FileAssetReader};
use crate::assets::loader::{LoadState, PendingAsset};
use crate::assets::loaders::image::{assemble_cube, decode_rgba8};
use crate::assets::loaders::{GltfLoader, Prefab};
use crate::errors::Result;
use crate::resources::{Geometry, Material, Texture};

/// Owns all CPU-side assets and loads new ones through an [`AssetReader`].
pub struct AssetServer {
    reader: Arc<dyn AssetReader>,

    pub geometries: SlotMap<GeometryHandle, Geometry>,
    pub materials: SlotMap<MaterialHandle, Material>,
    pub textures: SlotMap<TextureHandle, Texture>,
}

impl Default for AssetServer {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetServer {
    /// Server reading from the directory named by `MYTH_ASSET_ROOT`, or
    /// `./assets`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_reader(Arc::new(FileAssetReader::from_env()))
    }

    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::with_reader(Arc::new(FileAssetReader::new(root.into())))
    }

    #[must_use]
    pub fn with_reader(reader: Arc<dyn AssetReader>) -> Self {
        Self {
            reader,
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            textures: SlotMap::with_key(),
        }
    }

    #[must_use]
    pub fn resolve(&self, uri: &str) -> PathBuf {
        self.reader.resolve(uri)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        self.geometries.insert(geometry)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        self.materials.insert(material)
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureHandle {
        self.textures.insert(texture)
    }

    #[must_use]
    pub fn get_material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    pub fn get_material_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        self.materials.get_mut(handle)
    }

    // ========================================================================
    // Synchronous loads
    // ========================================================================

    /// Loads a PNG / JPEG as a 2D sRGB texture.
    pub fn load_texture(&mut self, uri: &str) -> Result<TextureHandle> {
        let bytes = self.reader.read_bytes(uri)?;
        let (width, height, data) = decode_rgba8(&bytes, &self.reader.resolve(uri))?;
        Ok(self.add_texture(Texture::new_2d(uri.to_string(), width, height, data)))
    }

    /// Loads six images into a cube map. `uris` are in `+X, -X, +Y, -Y, +Z, -Z`
    /// order.
    pub fn load_cube_texture(&mut self, uris: [&str; 6]) -> Result<TextureHandle> {
        let mut faces: [(u32, u32, Vec<u8>); 6] = Default::default();
        for (face, uri) in faces.iter_mut().zip(uris) {
            let bytes = self.reader.read_bytes(uri)?;
            *face = decode_rgba8(&bytes, &self.reader.resolve(uri))?;
        }

        let texture = assemble_cube(uris[0].to_string(), faces)?;
        log::info!(
            "Loaded cube map '{}' ({size}x{size} per face)",
            texture.name,
            size = texture.width
        );
        Ok(self.add_texture(texture))
    }

    // ========================================================================
    // Background loads
    // ========================================================================

    /// Reads and parses a glTF model on a worker thread.
    ///
    /// Poll the returned state once per frame, then call
    /// [`Prefab::instantiate`] once it is ready.
    pub fn load_gltf_async(&self, uri: &str) -> LoadState<Prefab> {
        let reader = Arc::clone(&self.reader);
        let path = reader.resolve(uri);
        let base_dir = path.parent().map(std::path::Path::to_path_buf);
        let uri = uri.to_string();

        log::info!("Loading glTF {}", path.display());
        PendingAsset::spawn(path, move || {
            let bytes = reader.read_bytes(&uri)?;
            let name = std::path::Path::new(&uri)
                .file_stem()
                .map_or_else(|| uri.clone(), |s| s.to_string_lossy().into_owned());
            GltfLoader::load(&bytes, &name, base_dir.as_deref())
        })
    }
}

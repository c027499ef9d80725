use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};

/// Environment variable overriding the asset root directory.
pub const ASSET_ROOT_ENV: &str = "MYTH_ASSET_ROOT";

/// Source of raw asset bytes.
///
/// Readers are shared with background loader threads, hence `Send + Sync`.
pub trait AssetReader: Send + Sync {
    /// Reads the whole asset at `uri`, relative to the reader's root.
    fn read_bytes(&self, uri: &str) -> Result<Vec<u8>>;

    /// Where `uri` resolves to, for error messages and relative lookups.
    fn resolve(&self, uri: &str) -> PathBuf;
}

/// Reads assets from a directory on the local file system.
#[derive(Debug, Clone)]
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            root_path: path.as_ref().to_path_buf(),
        }
    }

    /// Root from `MYTH_ASSET_ROOT`, or `assets` in the working directory.
    #[must_use]
    pub fn from_env() -> Self {
        let root = std::env::var_os(ASSET_ROOT_ENV).map_or_else(|| PathBuf::from("assets"), PathBuf::from);
        Self::new(root)
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl AssetReader for FileAssetReader {
    fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.resolve(uri);
        std::fs::read(&path).map_err(|source| Error::Io { path, source })
    }

    fn resolve(&self, uri: &str) -> PathBuf {
        self.root_path.join(uri)
    }
}

use std::path::Path;

use crate::errors::{Error, Result};
use crate::resources::Texture;

/// Decodes PNG / JPEG bytes into tightly packed RGBA8.
pub fn decode_rgba8(bytes: &[u8], path: &Path) -> Result<(u32, u32, Vec<u8>)> {
    let img = image::load_from_memory(bytes).map_err(|source| Error::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width, height, rgba.into_raw()))
}

/// Builds a cube map from six decoded faces in `+X, -X, +Y, -Y, +Z, -Z`
/// order. Faces must be square and share one size.
pub fn assemble_cube(name: String, faces: [(u32, u32, Vec<u8>); 6]) -> Result<Texture> {
    let size = faces[0].0;
    for (i, (w, h, _)) in faces.iter().enumerate() {
        if w != h {
            return Err(Error::CubeMap(format!("face {i} is {w}x{h}, expected a square")));
        }
        if *w != size {
            return Err(Error::CubeMap(format!("face {i} is {w}x{h}, expected {size}x{size}")));
        }
    }
    if size == 0 {
        return Err(Error::CubeMap("faces are empty".to_string()));
    }

    Ok(Texture::new_cube(name, size, faces.map(|(_, _, data)| data)))
}

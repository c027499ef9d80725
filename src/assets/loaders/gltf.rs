//! glTF 2.0 loading.
//!
//! Loading happens in two steps so the expensive part can run off the render
//! thread:
//!
//! 1. [`GltfLoader::load`] parses a `.glb` / `.gltf` into a [`Prefab`]: plain
//!    data without any handle or scene reference, safe to send across
//!    threads.
//! 2. [`Prefab::instantiate`] registers the prefab's geometries, materials
//!    and textures with an [`AssetServer`] and builds the node hierarchy
//!    under a single root node.
//!
//! Only what the demos need is read: triangle primitives with positions,
//! normals, UVs, vertex colors and indices; base color factors and base color
//! textures; node hierarchy and transforms.

use std::path::Path;

use glam::Mat4;

use crate::assets::AssetServer;
use crate::errors::{Error, Result};
use crate::resources::{Color, Geometry, Material, Mesh, Texture, Topology};
use crate::scene::{Node, NodeHandle, Scene};

// ============================================================================
// Prefab data
// ============================================================================

#[derive(Debug, Clone)]
pub struct PrefabMaterial {
    pub name: String,
    pub color: Color,
    /// Index into [`Prefab::textures`].
    pub texture: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PrefabPrimitive {
    pub geometry: Geometry,
    /// Index into [`Prefab::materials`], `None` for the default material.
    pub material: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PrefabNode {
    pub name: String,
    pub matrix: Mat4,
    pub primitives: Vec<PrefabPrimitive>,
    pub children: Vec<usize>,
}

/// A parsed model, independent of any scene.
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    pub name: String,
    pub nodes: Vec<PrefabNode>,
    pub roots: Vec<usize>,
    pub materials: Vec<PrefabMaterial>,
    pub textures: Vec<Texture>,
}

impl Prefab {
    /// Total number of primitives across all nodes.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.nodes.iter().map(|n| n.primitives.len()).sum()
    }

    /// Adds the model to `scene` under a new root node and returns it.
    pub fn instantiate(&self, scene: &mut Scene, assets: &mut AssetServer) -> NodeHandle {
        let textures: Vec<_> = self
            .textures
            .iter()
            .map(|t| assets.add_texture(t.clone()))
            .collect();

        let materials: Vec<_> = self
            .materials
            .iter()
            .map(|m| {
                let map = m.texture.and_then(|i| textures.get(i).copied());
                assets.add_material(Material::standard(m.color).with_map(map).with_name(m.name.clone()))
            })
            .collect();
        let mut default_material = None;

        let root = scene.add_node(Node::new(self.name.clone()));

        let mut stack: Vec<(usize, NodeHandle)> = self.roots.iter().rev().map(|&i| (i, root)).collect();
        while let Some((index, parent)) = stack.pop() {
            let Some(prefab_node) = self.nodes.get(index) else {
                log::warn!("Prefab '{}' references missing node {index}", self.name);
                continue;
            };

            let mut node = Node::new(prefab_node.name.clone());
            node.transform.apply_local_matrix(prefab_node.matrix);
            let handle = scene.add_to_parent(node, parent);

            for (i, primitive) in prefab_node.primitives.iter().enumerate() {
                let material = match primitive.material.and_then(|m| materials.get(m).copied()) {
                    Some(m) => m,
                    None => *default_material
                        .get_or_insert_with(|| assets.add_material(Material::standard(Color::WHITE))),
                };
                let geometry = assets.add_geometry(primitive.geometry.clone());
                let mesh = Mesh::new(geometry, material);

                if i == 0 {
                    scene.meshes.insert(handle, mesh);
                } else {
                    let name = format!("{}.primitive{i}", prefab_node.name);
                    scene.add_mesh_to_parent(Node::new(name), mesh, handle);
                }
            }

            stack.extend(prefab_node.children.iter().rev().map(|&c| (c, handle)));
        }

        root
    }
}

// ============================================================================
// Loader
// ============================================================================

pub struct GltfLoader;

impl GltfLoader {
    /// Parses glTF bytes. `base_dir` resolves external buffers and images.
    pub fn load(bytes: &[u8], name: &str, base_dir: Option<&Path>) -> Result<Prefab> {
        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
        let buffers = gltf::import_buffers(&document, base_dir, blob)?;
        let images = gltf::import_images(&document, base_dir, &buffers)?;

        let textures = images
            .into_iter()
            .enumerate()
            .map(|(i, image)| Self::convert_image(i, image))
            .collect::<Result<Vec<_>>>()?;

        let materials = document
            .materials()
            .map(|m| {
                let pbr = m.pbr_metallic_roughness();
                let [r, g, b, _] = pbr.base_color_factor();
                PrefabMaterial {
                    name: m.name().unwrap_or("material").to_string(),
                    color: Color::from_linear(r, g, b),
                    texture: pbr.base_color_texture().map(|info| info.texture().source().index()),
                }
            })
            .collect();

        let mut nodes = Vec::with_capacity(document.nodes().len());
        for node in document.nodes() {
            let primitives = match node.mesh() {
                Some(mesh) => Self::load_primitives(&mesh, &buffers)?,
                None => Vec::new(),
            };
            nodes.push(PrefabNode {
                name: node.name().map_or_else(|| format!("node{}", node.index()), str::to_string),
                matrix: Mat4::from_cols_array_2d(&node.transform().matrix()),
                primitives,
                children: node.children().map(|c| c.index()).collect(),
            });
        }

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| Error::UnsupportedGltf("document has no scene".to_string()))?;
        let roots = scene.nodes().map(|n| n.index()).collect();

        let prefab = Prefab {
            name: name.to_string(),
            nodes,
            roots,
            materials,
            textures,
        };
        log::info!(
            "Parsed glTF '{}': {} nodes, {} primitives, {} textures",
            prefab.name,
            prefab.nodes.len(),
            prefab.primitive_count(),
            prefab.textures.len()
        );
        Ok(prefab)
    }

    fn load_primitives(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> Result<Vec<PrefabPrimitive>> {
        let mut primitives = Vec::new();

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "Skipping primitive {} of mesh '{}': mode {:?} is not supported",
                    primitive.index(),
                    mesh.name().unwrap_or_default(),
                    primitive.mode()
                );
                continue;
            }

            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or_else(|| Error::UnsupportedGltf("primitive without POSITION".to_string()))?
                .collect();
            let normals = reader.read_normals().map(Iterator::collect);
            let uvs = reader.read_tex_coords(0).map(|t| t.into_f32().collect());
            let colors = reader.read_colors(0).map(|c| c.into_rgba_f32().collect());
            let indices = reader.read_indices().map(|i| i.into_u32().collect());

            primitives.push(PrefabPrimitive {
                geometry: Geometry {
                    positions,
                    normals,
                    uvs,
                    colors,
                    indices,
                    topology: Topology::TriangleList,
                },
                material: primitive.material().index(),
            });
        }

        Ok(primitives)
    }

    fn convert_image(index: usize, image: gltf::image::Data) -> Result<Texture> {
        use gltf::image::Format;

        let pixels = image.pixels;
        let data = match image.format {
            Format::R8G8B8A8 => pixels,
            Format::R8G8B8 => pixels.chunks_exact(3).flat_map(|p| [p[0], p[1], p[2], 255]).collect(),
            Format::R8G8 => pixels.chunks_exact(2).flat_map(|p| [p[0], p[1], 0, 255]).collect(),
            Format::R8 => pixels.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            other => {
                return Err(Error::UnsupportedGltf(format!("image {index} has pixel format {other:?}")));
            }
        };

        Ok(Texture::new_2d(format!("gltf-image-{index}"), image.width, image.height, data))
    }
}

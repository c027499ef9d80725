//! Render pipeline cache.
//!
//! Pipelines are keyed by [`PipelineKey`]: the shader program, the culled
//! side, the primitive topology and the depth-write flag. Custom shader
//! programs are identified by a hash of their WGSL source, so two materials
//! sharing the same `shade` body share one pipeline.
//!
//! A program that fails validation is remembered as failed; meshes using it
//! are skipped instead of retrying the compile every frame.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::renderer::resources::GpuResources;
use crate::resources::{Geometry, Material, MaterialKind, Side, Topology, Vertex};

const COMMON_WGSL: &str = include_str!("shaders/common.wgsl");
const BASIC_WGSL: &str = include_str!("shaders/basic.wgsl");
const STANDARD_WGSL: &str = include_str!("shaders/standard.wgsl");
const LINE_WGSL: &str = include_str!("shaders/line.wgsl");
const CUSTOM_WGSL: &str = include_str!("shaders/custom.wgsl");
const SKYBOX_WGSL: &str = include_str!("shaders/skybox.wgsl");

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2, 3 => Float32x4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    Basic,
    Standard,
    Line,
    /// Hash of the custom `shade` source.
    Custom(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub program: ProgramKind,
    pub side: Side,
    pub topology: Topology,
    pub depth_write: bool,
}

impl PipelineKey {
    #[must_use]
    pub fn new(material: &Material, geometry: &Geometry) -> Self {
        let program = match &material.kind {
            MaterialKind::Basic(_) => ProgramKind::Basic,
            MaterialKind::Standard(_) => ProgramKind::Standard,
            MaterialKind::Line(_) => ProgramKind::Line,
            MaterialKind::Shader(shader) => {
                let mut hasher = FxHasher::default();
                shader.fragment.hash(&mut hasher);
                ProgramKind::Custom(hasher.finish())
            }
        };
        Self {
            program,
            side: material.side,
            topology: geometry.topology,
            depth_write: material.depth_write,
        }
    }
}

/// Full WGSL module for a material.
#[must_use]
pub fn program_source(material: &Material) -> String {
    let body = match &material.kind {
        MaterialKind::Basic(_) => BASIC_WGSL,
        MaterialKind::Standard(_) => STANDARD_WGSL,
        MaterialKind::Line(_) => LINE_WGSL,
        MaterialKind::Shader(shader) => {
            return format!("{COMMON_WGSL}\n{CUSTOM_WGSL}\n{}", shader.fragment);
        }
    };
    format!("{COMMON_WGSL}\n{body}")
}

pub struct PipelineCache {
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    mesh_layout: wgpu::PipelineLayout,
    skybox: wgpu::RenderPipeline,

    lookup: FxHashMap<PipelineKey, Option<usize>>,
    pipelines: Vec<wgpu::RenderPipeline>,
}

impl PipelineCache {
    pub fn new(
        device: &wgpu::Device,
        resources: &GpuResources,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&resources.global_layout, &resources.object_layout],
            push_constant_ranges: &[],
        });

        let skybox = Self::create_skybox(device, resources, color_format, depth_format);

        Self {
            color_format,
            depth_format,
            mesh_layout,
            skybox,
            lookup: FxHashMap::default(),
            pipelines: Vec::new(),
        }
    }

    /// Pipeline index for `material` drawn with `geometry`, compiling it on
    /// first use. `None` when the program failed to compile.
    pub fn get_or_create(&mut self, device: &wgpu::Device, material: &Material, geometry: &Geometry) -> Option<usize> {
        let key = PipelineKey::new(material, geometry);
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }

        let id = self.compile(device, &key, &program_source(material), &material.name);
        self.lookup.insert(key, id);
        id
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(id)
    }

    #[inline]
    #[must_use]
    pub fn skybox(&self) -> &wgpu::RenderPipeline {
        &self.skybox
    }

    fn compile(&mut self, device: &wgpu::Device, key: &PipelineKey, source: &str, name: &str) -> Option<usize> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let cull_mode = match key.side {
            Side::Front => Some(wgpu::Face::Back),
            Side::Back => Some(wgpu::Face::Front),
            Side::Double => None,
        };
        let topology = match key.topology {
            Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            Topology::LineList => wgpu::PrimitiveTopology::LineList,
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(name),
            layout: Some(&self.mesh_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: self.depth_format,
                depth_write_enabled: key.depth_write,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            log::error!("Failed to build pipeline for material '{name}': {error}");
            return None;
        }

        log::debug!("Created pipeline #{} for {key:?}", self.pipelines.len());
        self.pipelines.push(pipeline);
        Some(self.pipelines.len() - 1)
    }

    fn create_skybox(
        device: &wgpu::Device,
        resources: &GpuResources,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Skybox Shader"),
            source: wgpu::ShaderSource::Wgsl(SKYBOX_WGSL.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Skybox Pipeline Layout"),
            bind_group_layouts: &[&resources.global_layout, &resources.skybox_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Skybox Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Color, ShaderMaterial};

    #[test]
    fn custom_programs_share_key_by_source() {
        let cube = Geometry::new_box(1.0, 1.0, 1.0);
        let a = Material::shader(ShaderMaterial::pulse());
        let b = Material::shader(ShaderMaterial::pulse());
        let c = Material::shader(ShaderMaterial::gradient());

        assert_eq!(PipelineKey::new(&a, &cube), PipelineKey::new(&b, &cube));
        assert_ne!(PipelineKey::new(&a, &cube), PipelineKey::new(&c, &cube));
    }

    #[test]
    fn side_and_topology_split_keys() {
        let cube = Geometry::new_box(1.0, 1.0, 1.0);
        let axes = Geometry::new_axes(1.0);
        let front = Material::basic(Color::WHITE);
        let back = Material::basic(Color::WHITE).with_side(Side::Back);

        assert_ne!(PipelineKey::new(&front, &cube), PipelineKey::new(&back, &cube));
        assert_ne!(PipelineKey::new(&front, &cube), PipelineKey::new(&front, &axes));
    }

    #[test]
    fn custom_source_wraps_shade_body() {
        let source = program_source(&Material::shader(ShaderMaterial::gradient()));
        assert!(source.contains("fn vs_main"));
        assert!(source.contains("fn shader_resolution"));
        assert!(source.contains("fn shade("));
    }
}

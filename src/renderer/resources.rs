//! GPU resource caches.
//!
//! [`GpuResources`] mirrors CPU assets onto the device lazily: geometries and
//! textures are uploaded the first frame a visible mesh references them, and
//! every mesh node owns a uniform buffer plus a bind group that is rebuilt
//! only when its textures change. Entries for nodes that were not drawn in a
//! frame are dropped at the end of [`GpuResources::prepare`].

use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};
use wgpu::util::DeviceExt;

use crate::assets::{AssetServer, GeometryHandle, TextureHandle};
use crate::renderer::context::WgpuContext;
use crate::renderer::uniforms::{GlobalUniforms, ObjectUniforms};
use crate::resources::{Geometry, Texture, TextureKind};
use crate::scene::{NodeHandle, Scene};

pub struct GpuGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub draw_count: u32,
}

pub struct GpuTexture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub kind: TextureKind,
}

struct ObjectBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    textures: (Option<TextureHandle>, Option<TextureHandle>),
    last_frame: u64,
}

/// Everything the forward pass needs to draw one mesh.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub node: NodeHandle,
    pub geometry: GeometryHandle,
    pub pipeline: usize,
}

pub struct GpuResources {
    global_buffer: wgpu::Buffer,
    pub global_layout: wgpu::BindGroupLayout,
    pub global_bind_group: wgpu::BindGroup,
    pub object_layout: wgpu::BindGroupLayout,
    pub skybox_layout: wgpu::BindGroupLayout,

    sampler: wgpu::Sampler,
    white_2d: GpuTexture,
    white_cube: GpuTexture,

    geometries: FxHashMap<GeometryHandle, GpuGeometry>,
    textures: FxHashMap<TextureHandle, GpuTexture>,
    rejected_textures: FxHashSet<TextureHandle>,
    objects: FxHashMap<NodeHandle, ObjectBinding>,
    skybox: Option<(TextureHandle, wgpu::BindGroup)>,

    frame_index: u64,
}

impl GpuResources {
    pub fn new(ctx: &WgpuContext) -> Self {
        let device = &ctx.device;

        let global_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Global Uniforms"),
            contents: bytemuck::bytes_of(&GlobalUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let global_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Global BindGroup Layout"),
            entries: &[uniform_entry(0)],
        });

        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global BindGroup"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object BindGroup Layout"),
            entries: &[
                uniform_entry(0),
                texture_entry(1, wgpu::TextureViewDimension::D2),
                texture_entry(2, wgpu::TextureViewDimension::Cube),
                sampler_entry(3),
            ],
        });

        let skybox_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Skybox BindGroup Layout"),
            entries: &[texture_entry(0, wgpu::TextureViewDimension::Cube), sampler_entry(1)],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Linear Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white_2d = upload_texture(ctx, &Texture::solid("White", [255; 4]));
        let white_cube = upload_texture(ctx, &Texture::solid_cube("White Cube", [255; 4]));

        Self {
            global_buffer,
            global_layout,
            global_bind_group,
            object_layout,
            skybox_layout,
            sampler,
            white_2d,
            white_cube,
            geometries: FxHashMap::default(),
            textures: FxHashMap::default(),
            rejected_textures: FxHashSet::default(),
            objects: FxHashMap::default(),
            skybox: None,
            frame_index: 0,
        }
    }

    /// Uploads this frame's data and returns the meshes to draw.
    ///
    /// `pipeline_for` resolves a material to a pipeline index; meshes whose
    /// material or pipeline cannot be resolved are skipped.
    pub fn prepare(
        &mut self,
        ctx: &WgpuContext,
        scene: &Scene,
        assets: &AssetServer,
        time: f32,
        mut pipeline_for: impl FnMut(&crate::resources::Material, &Geometry) -> Option<usize>,
    ) -> Vec<DrawItem> {
        self.frame_index += 1;

        let (width, height) = ctx.size();
        let resolution = Vec2::new(width as f32, height as f32);

        if let Some((camera, world)) = scene.active_camera() {
            let globals = GlobalUniforms::new(
                camera.projection_matrix(),
                world,
                scene.ambient_light.map(|a| (a.color, a.intensity)),
                time,
                resolution,
            );
            ctx.queue.write_buffer(&self.global_buffer, 0, bytemuck::bytes_of(&globals));
        }

        self.prepare_skybox(ctx, scene, assets);

        let mut draws = Vec::new();
        for (node, mesh, world) in scene.visible_meshes() {
            let Some(material) = assets.materials.get(mesh.material) else {
                continue;
            };
            let Some(geometry) = assets.geometries.get(mesh.geometry) else {
                continue;
            };
            let Some(pipeline) = pipeline_for(material, geometry) else {
                continue;
            };

            self.geometries
                .entry(mesh.geometry)
                .or_insert_with(|| upload_geometry(ctx, geometry));

            let (map, env_map) = material.textures();
            let map = map.filter(|&h| self.ensure_texture(ctx, assets, h, TextureKind::D2));
            let env_map = env_map.filter(|&h| self.ensure_texture(ctx, assets, h, TextureKind::Cube));

            let uniforms = ObjectUniforms::new(world, material, map.is_some(), env_map.is_some());
            self.write_object(ctx, node, &uniforms, (map, env_map));

            draws.push(DrawItem {
                node,
                geometry: mesh.geometry,
                pipeline,
            });
        }

        let frame = self.frame_index;
        self.objects.retain(|_, binding| binding.last_frame == frame);

        draws
    }

    fn prepare_skybox(&mut self, ctx: &WgpuContext, scene: &Scene, assets: &AssetServer) {
        let Some(handle) = scene.background.cube_map() else {
            self.skybox = None;
            return;
        };
        if self.skybox.as_ref().is_some_and(|(h, _)| *h == handle) {
            return;
        }
        if !self.ensure_texture(ctx, assets, handle, TextureKind::Cube) {
            self.skybox = None;
            return;
        }
        let Some(texture) = self.textures.get(&handle) else {
            return;
        };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Skybox BindGroup"),
            layout: &self.skybox_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        self.skybox = Some((handle, bind_group));
    }

    /// Uploads `handle` if needed. Returns `false` when the texture is
    /// missing, malformed or of the wrong kind.
    fn ensure_texture(
        &mut self,
        ctx: &WgpuContext,
        assets: &AssetServer,
        handle: TextureHandle,
        kind: TextureKind,
    ) -> bool {
        if let Some(texture) = self.textures.get(&handle) {
            return texture.kind == kind;
        }
        let Some(texture) = assets.textures.get(handle) else {
            return false;
        };
        if !texture.is_consistent() || texture.kind != kind {
            if self.rejected_textures.insert(handle) {
                log::warn!("Texture '{}' is not a valid {kind:?} texture, skipping", texture.name);
            }
            return false;
        }
        self.textures.insert(handle, upload_texture(ctx, texture));
        true
    }

    fn write_object(
        &mut self,
        ctx: &WgpuContext,
        node: NodeHandle,
        uniforms: &ObjectUniforms,
        textures: (Option<TextureHandle>, Option<TextureHandle>),
    ) {
        let frame = self.frame_index;

        if let Some(binding) = self.objects.get_mut(&node)
            && binding.textures == textures
        {
            ctx.queue.write_buffer(&binding.buffer, 0, bytemuck::bytes_of(uniforms));
            binding.last_frame = frame;
            return;
        }

        let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Uniforms"),
            contents: bytemuck::bytes_of(uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let map_view = textures
            .0
            .and_then(|h| self.textures.get(&h))
            .map_or(&self.white_2d.view, |t| &t.view);
        let env_view = textures
            .1
            .and_then(|h| self.textures.get(&h))
            .map_or(&self.white_cube.view, |t| &t.view);

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object BindGroup"),
            layout: &self.object_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(map_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(env_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.objects.insert(
            node,
            ObjectBinding {
                buffer,
                bind_group,
                textures,
                last_frame: frame,
            },
        );
    }

    // ========================================================================
    // Read-only access for the execute phase
    // ========================================================================

    #[must_use]
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&GpuGeometry> {
        self.geometries.get(&handle)
    }

    #[must_use]
    pub fn object_bind_group(&self, node: NodeHandle) -> Option<&wgpu::BindGroup> {
        self.objects.get(&node).map(|b| &b.bind_group)
    }

    #[must_use]
    pub fn skybox_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.skybox.as_ref().map(|(_, bg)| bg)
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn texture_entry(binding: u32, view_dimension: wgpu::TextureViewDimension) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

fn upload_geometry(ctx: &WgpuContext, geometry: &Geometry) -> GpuGeometry {
    let vertices = geometry.interleave();
    let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Vertex Buffer"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = geometry.indices.as_ref().map(|indices| {
        ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        })
    });
    GpuGeometry {
        vertex_buffer,
        index_buffer,
        draw_count: geometry.draw_count(),
    }
}

fn upload_texture(ctx: &WgpuContext, texture: &Texture) -> GpuTexture {
    let format = if texture.srgb {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    };

    let gpu_texture = ctx.device.create_texture_with_data(
        &ctx.queue,
        &wgpu::TextureDescriptor {
            label: Some(texture.name.as_ref()),
            size: wgpu::Extent3d {
                width: texture.width,
                height: texture.height,
                depth_or_array_layers: texture.layer_count(),
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &texture.data,
    );

    let dimension = match texture.kind {
        TextureKind::D2 => wgpu::TextureViewDimension::D2,
        TextureKind::Cube => wgpu::TextureViewDimension::Cube,
    };
    let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some(texture.name.as_ref()),
        dimension: Some(dimension),
        ..Default::default()
    });

    GpuTexture {
        _texture: gpu_texture,
        view,
        kind: texture.kind,
    }
}

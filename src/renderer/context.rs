//! wgpu Context
//!
//! The [`WgpuContext`] holds core GPU handles: device, queue, surface, and config.
//! It is responsible for window surface management and resize handling.

use std::sync::Arc;

use winit::window::Window;

use crate::errors::{Error, Result};
use crate::renderer::settings::RenderSettings;

/// Core wgpu context holding GPU handles.
///
/// The surface is configured with a non-sRGB format. Every built-in shader
/// encodes its output to sRGB itself, and custom shaders write their values
/// unchanged, which is also what the egui renderer expects.
pub struct WgpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
    /// Adapter description, reported once at startup.
    pub adapter_info: wgpu::AdapterInfo,

    pub depth_format: wgpu::TextureFormat,
    /// Depth buffer view (recreated on resize)
    pub depth_texture_view: wgpu::TextureView,
}

impl WgpuContext {
    pub async fn new(window: Arc<Window>, settings: &RenderSettings, width: u32, height: u32) -> Result<Self> {
        let requested = settings.instance_backends();
        let (surface, adapter) = match Self::request_adapter(window.clone(), settings, requested).await {
            Ok(pair) => pair,
            Err(e) if requested != wgpu::Backends::all() => {
                log::warn!("No adapter for requested backends {requested:?} ({e}), falling back to any backend");
                Self::request_adapter(window, settings, wgpu::Backends::all()).await?
            }
            Err(e) => return Err(e),
        };

        let adapter_info = adapter.get_info();
        log::info!(
            "Graphics adapter: {} ({:?}, {:?})",
            adapter_info.name,
            adapter_info.backend,
            adapter_info.device_type
        );
        log::info!("Graphics driver: {} {}", adapter_info.driver, adapter_info.driver_info);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Playground Device"),
                required_features: wgpu::Features::empty(),
                required_limits: settings.required_limits.clone().using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        let mut config = surface
            .get_default_config(&adapter, width.max(1), height.max(1))
            .ok_or_else(|| Error::SurfaceUnsupported(adapter_info.name.clone()))?;

        let capabilities = surface.get_capabilities(&adapter);
        config.format = capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or_else(|| config.format.remove_srgb_suffix());
        config.present_mode = if settings.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        surface.configure(&device, &config);
        log::debug!("Surface configured: {:?} {}x{}", config.format, config.width, config.height);

        let depth_texture_view = Self::create_depth_texture(&device, &config, settings.depth_format);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            adapter_info,
            depth_format: settings.depth_format,
            depth_texture_view,
        })
    }

    async fn request_adapter(
        window: Arc<Window>,
        settings: &RenderSettings,
        backends: wgpu::Backends,
    ) -> Result<(wgpu::Surface<'static>, wgpu::Adapter)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: settings.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::AdapterRequestFailed(e.to_string()))?;

        Ok((surface, adapter))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture_view = Self::create_depth_texture(&self.device, &self.config, self.depth_format);
        }
    }

    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        format: wgpu::TextureFormat,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Returns the surface color format.
    #[inline]
    #[must_use]
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current surface dimensions.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

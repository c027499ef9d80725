//! Rendering System
//!
//! A small forward renderer on top of wgpu.
//!
//! - [`context`]: device, queue, surface and depth buffer ([`WgpuContext`])
//! - [`settings`]: startup configuration ([`RenderSettings`])
//! - [`resources`]: lazily uploaded geometries, textures and per-mesh bindings
//! - [`pipeline`]: pipeline cache keyed by program, side and topology
//! - [`frame`]: the [`RenderNode`] trait and the chained [`FrameComposer`]
//!
//! The renderer is created unconfigured; [`Renderer::init`] attaches it to a
//! window once the event loop has resumed.

pub mod context;
pub mod forward;
pub mod frame;
pub mod pipeline;
pub mod resources;
pub mod settings;
pub mod uniforms;

use std::sync::Arc;

use winit::window::Window;

use crate::assets::AssetServer;
use crate::errors::Result;
use crate::scene::{Background, Scene};

pub use context::WgpuContext;
pub use forward::ForwardPass;
pub use frame::{ExecuteContext, FrameComposer, PrepareContext, RenderNode};
pub use pipeline::PipelineCache;
pub use resources::GpuResources;
pub use settings::RenderSettings;

struct GpuState {
    context: WgpuContext,
    resources: GpuResources,
    pipelines: PipelineCache,
    forward: ForwardPass,
}

pub struct Renderer {
    settings: RenderSettings,
    state: Option<GpuState>,
}

impl Renderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings, state: None }
    }

    /// Creates the GPU context for `window`.
    pub async fn init(&mut self, window: Arc<Window>, width: u32, height: u32) -> Result<()> {
        let context = WgpuContext::new(window, &self.settings, width, height).await?;
        let resources = GpuResources::new(&context);
        let pipelines = PipelineCache::new(
            &context.device,
            &resources,
            context.color_format(),
            context.depth_format,
        );

        self.state = Some(GpuState {
            context,
            resources,
            pipelines,
            forward: ForwardPass::default(),
        });
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(state) = &mut self.state {
            state.context.resize(width, height);
        }
    }

    /// Surface size, `None` before [`init`](Self::init).
    #[must_use]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.state.as_ref().map(|s| s.context.size())
    }

    #[must_use]
    pub fn context(&self) -> Option<&WgpuContext> {
        self.state.as_ref().map(|s| &s.context)
    }

    /// Prepares the scene for drawing and returns a composer for the frame.
    ///
    /// Returns `None` when the renderer is not initialized.
    pub fn begin_frame<'a>(
        &'a mut self,
        scene: &Scene,
        assets: &AssetServer,
        time: f32,
    ) -> Option<FrameComposer<'a>> {
        let GpuState {
            context,
            resources,
            pipelines,
            forward,
        } = self.state.as_mut()?;

        forward.draws = resources.prepare(context, scene, assets, time, |material, geometry| {
            pipelines.get_or_create(&context.device, material, geometry)
        });
        forward.clear_color = match scene.background {
            Background::Color(color) => color,
            Background::CubeMap(_) => self.settings.clear_color,
        };

        Some(FrameComposer::new(context, resources, pipelines, forward))
    }
}

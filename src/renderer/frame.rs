//! Frame composition.
//!
//! A frame runs in three phases:
//!
//! 1. **Prepare**: [`Renderer::begin_frame`](super::Renderer::begin_frame)
//!    uploads scene data and collects draw items
//! 2. **Compose**: the application chains extra [`RenderNode`]s (the GUI)
//!    onto the returned [`FrameComposer`]
//! 3. **Execute**: [`FrameComposer::render`] acquires the surface, records
//!    every node into one command encoder and presents
//!
//! ```ignore
//! if let Some(composer) = renderer.begin_frame(&scene, &assets, time) {
//!     composer.add_node(&mut ui_pass).render();
//! }
//! ```

use crate::renderer::context::WgpuContext;
use crate::renderer::forward::ForwardPass;
use crate::renderer::pipeline::PipelineCache;
use crate::renderer::resources::GpuResources;

/// Mutable access granted to nodes before recording starts.
pub struct PrepareContext<'a> {
    pub wgpu_ctx: &'a WgpuContext,
}

/// Read-only access while commands are recorded.
pub struct ExecuteContext<'a> {
    pub wgpu_ctx: &'a WgpuContext,
    pub resources: &'a GpuResources,
    pub pipelines: &'a PipelineCache,
    /// Current frame's surface texture view
    pub surface_view: &'a wgpu::TextureView,
}

/// One pass or overlay in the frame.
pub trait RenderNode {
    fn name(&self) -> &str;

    /// Uploads data the node needs; may submit its own command buffers.
    fn prepare(&mut self, _ctx: &mut PrepareContext) {}

    /// Records the node's commands.
    fn run(&self, ctx: &ExecuteContext, encoder: &mut wgpu::CommandEncoder);
}

pub struct FrameComposer<'a> {
    wgpu_ctx: &'a WgpuContext,
    resources: &'a GpuResources,
    pipelines: &'a PipelineCache,
    scene_pass: &'a mut ForwardPass,
    nodes: Vec<&'a mut dyn RenderNode>,
}

impl<'a> FrameComposer<'a> {
    pub(crate) fn new(
        wgpu_ctx: &'a WgpuContext,
        resources: &'a GpuResources,
        pipelines: &'a PipelineCache,
        scene_pass: &'a mut ForwardPass,
    ) -> Self {
        Self {
            wgpu_ctx,
            resources,
            pipelines,
            scene_pass,
            nodes: Vec::new(),
        }
    }

    /// Appends a node drawn after the scene, in call order.
    #[inline]
    #[must_use]
    pub fn add_node(mut self, node: &'a mut dyn RenderNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn render(self) {
        let Self {
            wgpu_ctx,
            resources,
            pipelines,
            scene_pass,
            mut nodes,
        } = self;

        // Acquire as late as possible to keep the swap chain image short-lived.
        let output = match wgpu_ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                wgpu_ctx.surface.configure(&wgpu_ctx.device, &wgpu_ctx.config);
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface acquire timed out, skipping frame");
                return;
            }
            Err(e) => {
                log::error!("Render error: {e:?}");
                return;
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut prepare_ctx = PrepareContext { wgpu_ctx };
        scene_pass.prepare(&mut prepare_ctx);
        for node in &mut nodes {
            node.prepare(&mut prepare_ctx);
        }

        let mut encoder = wgpu_ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        let execute_ctx = ExecuteContext {
            wgpu_ctx,
            resources,
            pipelines,
            surface_view: &view,
        };
        scene_pass.run(&execute_ctx, &mut encoder);
        for node in &nodes {
            log::trace!("Recording {}", node.name());
            node.run(&execute_ctx, &mut encoder);
        }

        wgpu_ctx.queue.submit(Some(encoder.finish()));
        output.present();
    }
}

//! Scene pass: clears the surface, draws the skybox, then every visible mesh.

use crate::renderer::frame::{ExecuteContext, RenderNode};
use crate::renderer::resources::DrawItem;
use crate::resources::Color;
use crate::resources::color::linear_to_srgb;

#[derive(Default)]
pub struct ForwardPass {
    pub(crate) draws: Vec<DrawItem>,
    pub(crate) clear_color: Color,
}

impl ForwardPass {
    /// Clear value for the non-sRGB surface.
    fn encoded_clear(&self) -> wgpu::Color {
        let c = self.clear_color;
        wgpu::Color {
            r: f64::from(linear_to_srgb(c.r)),
            g: f64::from(linear_to_srgb(c.g)),
            b: f64::from(linear_to_srgb(c.b)),
            a: 1.0,
        }
    }
}

impl RenderNode for ForwardPass {
    fn name(&self) -> &str {
        "Forward Pass"
    }

    fn run(&self, ctx: &ExecuteContext, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Forward Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: ctx.surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.encoded_clear()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &ctx.wgpu_ctx.depth_texture_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_bind_group(0, &ctx.resources.global_bind_group, &[]);

        if let Some(sky) = ctx.resources.skybox_bind_group() {
            pass.set_pipeline(ctx.pipelines.skybox());
            pass.set_bind_group(1, sky, &[]);
            pass.draw(0..3, 0..1);
        }

        for item in &self.draws {
            let (Some(pipeline), Some(geometry), Some(bind_group)) = (
                ctx.pipelines.get(item.pipeline),
                ctx.resources.geometry(item.geometry),
                ctx.resources.object_bind_group(item.node),
            ) else {
                continue;
            };

            pass.set_pipeline(pipeline);
            pass.set_bind_group(1, bind_group, &[]);
            pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
            match &geometry.index_buffer {
                Some(indices) => {
                    pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..geometry.draw_count, 0, 0..1);
                }
                None => pass.draw(0..geometry.draw_count, 0..1),
            }
        }
    }
}

use crate::canvas::FrameGeometry;
use crate::coords::Rect;
use crate::pipeline::{FrameUniform, PipelineId, PipelineSet, Vertex};

use super::RenderCtx;

const MIN_VERTEX_CAPACITY: usize = 1024;

/// Counters for one [`BatchRenderer::render`] call.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub draws: usize,
    pub pipeline_switches: usize,
    pub vertices: usize,
}

/// Replays a frame's sealed draw calls into a render pass.
///
/// Owns the persistent GPU buffers: a vertex buffer that only grows
/// (power-of-two vertex counts), the frame uniform buffer and its bind group.
/// The whole vertex arena is uploaded once, before any call is replayed.
pub struct BatchRenderer {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_capacity: usize,
}

impl BatchRenderer {
    pub fn new(device: &wgpu::Device, pipelines: &PipelineSet, initial_vertices: usize) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bespoke frame ubo"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bespoke frame bind group"),
            layout: pipelines.bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let mut renderer = Self {
            uniform_buffer,
            bind_group,
            vertex_buffer: None,
            vertex_capacity: 0,
        };
        renderer.ensure_vertex_capacity(device, initial_vertices);
        renderer
    }

    pub fn vertex_capacity(&self) -> usize {
        self.vertex_capacity
    }

    /// Uploads `uniform` and `geometry`, then issues one draw per call.
    ///
    /// Calls whose scissor lies entirely outside the target are skipped.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        pass: &mut wgpu::RenderPass<'static>,
        geometry: &FrameGeometry,
        uniform: &FrameUniform,
    ) -> RenderStats {
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));

        let mut stats = RenderStats::default();
        let vertices = geometry.vertices();
        if geometry.calls().is_empty() || vertices.is_empty() {
            return stats;
        }

        self.ensure_vertex_capacity(ctx.device, vertices.len());
        let Some(vbo) = self.vertex_buffer.as_ref() else { return stats };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
        stats.vertices = vertices.len();

        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, vbo.slice(..));

        let mut bound: Option<PipelineId> = None;
        for call in geometry.calls() {
            if call.vertices.is_empty() {
                continue;
            }
            let Some((x, y, w, h)) =
                scissor_rect(call.scissor, ctx.target_size, ctx.viewport.pixel_ratio)
            else {
                continue;
            };

            if bound != Some(call.pipeline) {
                pass.set_pipeline(ctx.pipelines.get(call.pipeline));
                bound = Some(call.pipeline);
                stats.pipeline_switches += 1;
            }
            pass.set_scissor_rect(x, y, w, h);
            pass.draw(call.vertices.clone(), 0..1);
            stats.draws += 1;
        }

        log::trace!(
            "frame: {} draws, {} pipeline switches, {} vertices",
            stats.draws,
            stats.pipeline_switches,
            stats.vertices
        );
        stats
    }

    fn ensure_vertex_capacity(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.vertex_capacity && self.vertex_buffer.is_some() {
            return;
        }
        let capacity = required.max(MIN_VERTEX_CAPACITY).next_power_of_two();
        if self.vertex_buffer.is_some() {
            log::debug!("vertex buffer grows {} -> {capacity} vertices", self.vertex_capacity);
        }

        self.vertex_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bespoke canvas vbo"),
            size: (capacity * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = capacity;
    }
}

/// Maps a logical device-space clip rect to physical scissor arguments.
///
/// `None` clip covers the whole target. Returns `None` when the clipped
/// area is empty, which means the draw should be skipped.
pub fn scissor_rect(
    clip: Option<Rect>,
    target: (u32, u32),
    pixel_ratio: f32,
) -> Option<(u32, u32, u32, u32)> {
    let (tw, th) = target;
    if tw == 0 || th == 0 {
        return None;
    }
    let Some(r) = clip else {
        return Some((0, 0, tw, th));
    };

    let scale = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
    let r = r.normalized();
    let clamp = |v: f32, limit: u32| (v.max(0.0) as u32).min(limit);

    // Near edges round down and far edges round up to whole pixels.
    let x = clamp((r.origin.x * scale).floor(), tw);
    let y = clamp((r.origin.y * scale).floor(), th);
    let x2 = clamp(((r.origin.x + r.size.x) * scale).ceil(), tw);
    let y2 = clamp(((r.origin.y + r.size.y) * scale).ceil(), th);
    let (w, h) = (x2.saturating_sub(x), y2.saturating_sub(y));

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::test_support::headless_device;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn no_clip_covers_the_target() {
        assert_eq!(scissor_rect(None, (800, 600), 2.0), Some((0, 0, 800, 600)));
    }

    #[test]
    fn clip_scales_by_pixel_ratio() {
        assert_eq!(
            scissor_rect(Some(rect(10.0, 20.0, 30.0, 40.0)), (1600, 1200), 2.0),
            Some((20, 40, 60, 80))
        );
    }

    #[test]
    fn clip_is_clamped_to_the_target() {
        assert_eq!(
            scissor_rect(Some(rect(-10.0, -10.0, 50.0, 5000.0)), (100, 100), 1.0),
            Some((0, 0, 40, 100))
        );
    }

    #[test]
    fn fractional_far_edges_round_outward() {
        assert_eq!(
            scissor_rect(Some(rect(1.0, 1.0, 2.5, 2.5)), (100, 100), 1.0),
            Some((1, 1, 3, 3))
        );
    }

    #[test]
    fn empty_or_offscreen_clip_skips() {
        assert_eq!(scissor_rect(Some(rect(0.0, 0.0, 0.0, 10.0)), (100, 100), 1.0), None);
        assert_eq!(scissor_rect(Some(rect(200.0, 0.0, 10.0, 10.0)), (100, 100), 1.0), None);
        assert_eq!(scissor_rect(None, (0, 100), 1.0), None);
    }

    #[test]
    fn replay_issues_one_draw_per_pipeline_run() {
        use PipelineId::{Button as B, Solid as A};
        let Some((device, queue)) = headless_device() else {
            eprintln!("no GPU adapter; skipping");
            return;
        };
        let format = wgpu::TextureFormat::Rgba8Unorm;
        let pipelines = PipelineSet::build_for(&device, format).expect("canvas pipelines build");
        let mut renderer = BatchRenderer::new(&device, &pipelines, 16);

        let mut canvas = Canvas::default();
        canvas.begin_frame(64.0, 64.0, 1.0, 0.0);
        for (i, id) in [A, A, A, B, B, A].into_iter().enumerate() {
            canvas.draw_quad(i as f32 * 8.0, 0.0, 8.0, 8.0, id);
        }
        canvas.end_frame();

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("replay target"),
            size: wgpu::Extent3d { width: 64, height: 64, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("replay encoder"),
        });
        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("replay pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            })
            .forget_lifetime();

        let ctx = RenderCtx::new(&device, &queue, &pipelines, canvas.viewport(), (64, 64));
        let stats = renderer.render(&ctx, &mut pass, canvas.geometry(), &canvas.frame_uniform());
        drop(pass);
        queue.submit([encoder.finish()]);

        assert_eq!(stats.draws, 3);
        assert_eq!(stats.pipeline_switches, 3);
        assert_eq!(stats.vertices, 36);
        assert_eq!(renderer.vertex_capacity(), MIN_VERTEX_CAPACITY);
    }
}

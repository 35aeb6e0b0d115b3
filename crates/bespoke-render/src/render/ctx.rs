use crate::coords::Viewport;
use crate::pipeline::PipelineSet;

/// Renderer-facing borrows for one frame: device, queue, the pipeline table,
/// and the logical viewport and physical target size the frame draws into.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub pipelines: &'a PipelineSet,
    pub viewport: Viewport,
    /// Physical pixels of the acquired surface texture.
    pub target_size: (u32, u32),
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        pipelines: &'a PipelineSet,
        viewport: Viewport,
        target_size: (u32, u32),
    ) -> Self {
        Self {
            device,
            queue,
            pipelines,
            viewport,
            target_size,
        }
    }
}

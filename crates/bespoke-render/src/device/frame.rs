/// A single acquired frame: presentable texture, its view, the command
/// encoder and the open render pass (cleared to the session's clear color).
///
/// Short-lived. Holding it blocks acquisition of the next surface texture, so
/// hand it back to [`DeviceSession::end_frame`](super::DeviceSession::end_frame)
/// promptly.
pub struct GpuFrame {
    pub(super) surface_texture: wgpu::SurfaceTexture,
    pub(super) view: wgpu::TextureView,
    pub(super) encoder: wgpu::CommandEncoder,
    pub(super) pass: Option<wgpu::RenderPass<'static>>,
}

impl GpuFrame {
    /// The open render pass. `None` only after the frame was ended.
    pub fn pass_mut(&mut self) -> Option<&mut wgpu::RenderPass<'static>> {
        self.pass.as_mut()
    }

    /// Physical size of the acquired texture.
    pub fn size(&self) -> (u32, u32) {
        let t = &self.surface_texture.texture;
        (t.width(), t.height())
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

use bytemuck::{Pod, Zeroable};

/// The vertex every pipeline consumes.
///
/// `pos` is in logical pixels after the canvas transform; `uv` spans
/// (0,0)-(1,1) across widget quads and is zero for plain fills and strokes;
/// `color` is straight (non-premultiplied) RGBA.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    #[inline]
    pub const fn new(pos: [f32; 2], uv: [f32; 2], color: [f32; 4]) -> Self {
        Self { pos, uv, color }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Per-frame uniform at `@group(0) @binding(0)`, visible to both stages.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    /// Logical viewport size; never below 1×1.
    pub viewport: [f32; 2],
    /// Seconds, for animated fragments.
    pub time: f32,
    pub pixel_ratio: f32,
}

impl FrameUniform {
    pub fn new(width: f32, height: f32, time: f32, pixel_ratio: f32) -> Self {
        Self {
            viewport: [width.max(1.0), height.max(1.0)],
            time,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
        }
    }

    /// `wgpu` minimum binding size for this uniform.
    pub fn min_binding_size() -> std::num::NonZeroU64 {
        const SIZE: std::num::NonZeroU64 =
            match std::num::NonZeroU64::new(std::mem::size_of::<FrameUniform>() as u64) {
                Some(n) => n,
                None => panic!("FrameUniform has non-zero size"),
            };
        SIZE
    }
}

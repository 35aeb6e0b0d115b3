/// Viewport size in logical pixels plus the device pixel ratio of the frame.
///
/// `width`/`height` are the basis the vertex shader uses to map device-space
/// positions to NDC; `pixel_ratio` maps logical scissor rects to physical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, pixel_ratio: 1.0 }
    }
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self { width, height, pixel_ratio }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
            && self.pixel_ratio > 0.0
    }

    /// Physical surface size for this viewport, at least 1×1.
    #[inline]
    pub fn physical_size(self) -> (u32, u32) {
        let ratio = if self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 };
        (
            (self.width * ratio).round().max(1.0) as u32,
            (self.height * ratio).round().max(1.0) as u32,
        )
    }
}

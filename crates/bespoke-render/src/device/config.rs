use crate::paint::Color;

/// Initialization parameters for a [`DeviceSession`](super::DeviceSession).
///
/// Keep this structure small. Add configuration flags only when a concrete
/// platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Backends the instance may use. An empty set fails instance creation.
    pub backends: wgpu::Backends,

    /// Adapter preference passed to the adapter request.
    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is the only mode guaranteed everywhere, including browsers.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,

    /// Color every frame's render pass clears to.
    pub clear_color: Color,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            clear_color: Color::rgb(0.1, 0.1, 0.1),
        }
    }
}

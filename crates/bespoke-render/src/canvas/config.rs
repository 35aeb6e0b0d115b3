use crate::paint::Color;

/// Tessellation and batching parameters for a [`Canvas`](super::Canvas).
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Device pixels of arc length per arc segment.
    pub arc_tessellation: f32,

    /// Segments per flattened Bézier curve.
    pub curve_segments: u32,

    /// Strokes at or below this width are drawn as GPU lines.
    pub hairline_width: f32,

    /// Vertices reserved up front for a frame's geometry.
    pub initial_vertex_capacity: usize,

    pub font_size: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            arc_tessellation: 4.0,
            curve_segments: 20,
            hairline_width: 1.0,
            initial_vertex_capacity: 65_536,
            font_size: 14.0,
        }
    }
}

/// Colors for widgets whose call signature carries none.
#[derive(Debug, Copy, Clone)]
pub struct WidgetTheme {
    pub panel: Color,
    pub surface: Color,
    pub accent: Color,
    pub text: Color,
    pub led: Color,
    pub trace: Color,
    pub grid: Color,
}

impl Default for WidgetTheme {
    fn default() -> Self {
        Self {
            panel: Color::rgb(0.16, 0.17, 0.19),
            surface: Color::rgb(0.28, 0.29, 0.32),
            accent: Color::rgb(0.95, 0.62, 0.18),
            text: Color::rgb(0.92, 0.92, 0.9),
            led: Color::rgb(1.0, 0.22, 0.15),
            trace: Color::rgb(0.35, 1.0, 0.55),
            grid: Color::rgb(0.5, 0.55, 0.6),
        }
    }
}

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::coords::{Rect, Transform, Vec2, Viewport};
use crate::paint::Color;
use crate::pipeline::{FrameUniform, PipelineId, Vertex};

use super::batch::FrameGeometry;
use super::path::{arc_segments, cubic_point, elevate_quadratic, ArcDirection, Path};
use super::state::{DrawState, StateStack};
use super::text::{BoxGlyphs, GlyphBox, GlyphSource};
use super::{CanvasConfig, WidgetTheme};

const ELLIPSE_SEGMENTS: usize = 32;
const DEGENERATE_SEGMENT: f32 = 1e-4;

/// Immediate-mode 2D drawing surface.
///
/// Draw calls are accepted only between [`begin_frame`](Self::begin_frame) and
/// [`end_frame`](Self::end_frame); they flatten into the frame's
/// [`FrameGeometry`], batched by pipeline. No GPU objects live here.
pub struct Canvas {
    config: CanvasConfig,
    theme: WidgetTheme,
    states: StateStack,
    path: Path,
    geometry: FrameGeometry,
    glyphs: Box<dyn GlyphSource>,
    glyph_scratch: Vec<GlyphBox>,
    font_size: f32,
    font_face: String,
    viewport: Viewport,
    time: f32,
    in_frame: bool,
    warned_outside_frame: bool,
    warned_empty_data: bool,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_glyphs(config, Box::new(BoxGlyphs::default()))
    }

    pub fn with_glyphs(config: CanvasConfig, glyphs: Box<dyn GlyphSource>) -> Self {
        Self {
            geometry: FrameGeometry::with_capacity(config.initial_vertex_capacity),
            font_size: config.font_size,
            config,
            theme: WidgetTheme::default(),
            states: StateStack::default(),
            path: Path::default(),
            glyphs,
            glyph_scratch: Vec::new(),
            font_face: String::from("sans"),
            viewport: Viewport::default(),
            time: 0.0,
            in_frame: false,
            warned_outside_frame: false,
            warned_empty_data: false,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn theme(&self) -> &WidgetTheme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: WidgetTheme) {
        self.theme = theme;
    }

    pub fn set_glyph_source(&mut self, glyphs: Box<dyn GlyphSource>) {
        self.glyphs = glyphs;
    }

    // ── frame ──────────────────────────────────────────────────────────

    /// Starts a frame: default draw state, empty path, empty geometry.
    pub fn begin_frame(&mut self, width: f32, height: f32, pixel_ratio: f32, time: f32) {
        if self.in_frame {
            log::debug!("canvas: begin_frame while a frame is open; previous geometry discarded");
        }
        self.states.reset();
        self.path.clear();
        self.geometry.clear();
        self.viewport = Viewport::new(width, height, pixel_ratio);
        self.time = time;
        self.in_frame = true;
    }

    /// Seals the last batch. The geometry stays readable until the next frame.
    pub fn end_frame(&mut self) -> &FrameGeometry {
        self.geometry.flush();
        self.in_frame = false;
        &self.geometry
    }

    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    pub fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame_uniform(&self) -> FrameUniform {
        FrameUniform::new(
            self.viewport.width,
            self.viewport.height,
            self.time,
            self.viewport.pixel_ratio,
        )
    }

    // ── state ──────────────────────────────────────────────────────────

    pub fn state(&self) -> &DrawState {
        self.states.current()
    }

    pub fn save(&mut self) {
        self.states.save();
    }

    pub fn restore(&mut self) {
        self.states.restore();
    }

    /// Default state, saved states dropped.
    pub fn reset(&mut self) {
        self.states.reset();
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.states.current_mut().transform.translate(x, y);
    }

    pub fn rotate(&mut self, angle: f32) {
        self.states.current_mut().transform.rotate(angle);
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.states.current_mut().transform.scale(x, y);
    }

    pub fn reset_transform(&mut self) {
        self.states.current_mut().transform = Transform::IDENTITY;
    }

    pub fn transform(&self) -> Transform {
        self.states.current().transform
    }

    pub fn fill_color(&mut self, color: Color) {
        self.states.current_mut().fill = color;
    }

    pub fn stroke_color(&mut self, color: Color) {
        self.states.current_mut().stroke = color;
    }

    pub fn stroke_width(&mut self, width: f32) {
        self.states.current_mut().stroke_width = width.max(0.0);
    }

    /// Clips to the device-space bounds of the transformed rect.
    pub fn scissor(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let rect = self.device_bounds(Rect::new(x, y, w, h));
        self.states.current_mut().scissor = Some(rect);
    }

    /// Narrows the current scissor. Disjoint rects clip everything.
    pub fn intersect_scissor(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let rect = self.device_bounds(Rect::new(x, y, w, h));
        let state = self.states.current_mut();
        state.scissor = Some(match state.scissor {
            None => rect,
            Some(prev) => prev
                .intersect(rect)
                .unwrap_or(Rect::new(rect.origin.x, rect.origin.y, 0.0, 0.0)),
        });
    }

    pub fn reset_scissor(&mut self) {
        self.states.current_mut().scissor = None;
    }

    fn device_bounds(&self, rect: Rect) -> Rect {
        let t = self.transform();
        Rect::bounding(rect.normalized().corners().map(|c| t.apply(c))).unwrap_or_default()
    }

    // ── path construction ──────────────────────────────────────────────

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    #[inline]
    fn to_device(&self, x: f32, y: f32) -> Vec2 {
        self.transform().apply(Vec2::new(x, y))
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        let p = self.to_device(x, y);
        self.path.move_to(p);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        let p = self.to_device(x, y);
        self.path.line_to(p);
    }

    pub fn close_path(&mut self) {
        self.path.close();
    }

    /// Cubic Bézier from the current point, flattened to
    /// `curve_segments` lines.
    pub fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        let c1 = self.to_device(c1x, c1y);
        let c2 = self.to_device(c2x, c2y);
        let end = self.to_device(x, y);
        self.flatten_cubic(c1, c2, end);
    }

    /// Quadratic Bézier, elevated to the equivalent cubic.
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let c = self.to_device(cx, cy);
        let end = self.to_device(x, y);
        let start = self.path.current_point().unwrap_or(c);
        let (c1, c2) = elevate_quadratic(start, c, end);
        self.flatten_cubic(c1, c2, end);
    }

    fn flatten_cubic(&mut self, c1: Vec2, c2: Vec2, end: Vec2) {
        let start = match self.path.current_point() {
            Some(p) => p,
            None => {
                self.path.move_to(c1);
                c1
            }
        };
        let n = self.config.curve_segments.max(1);
        for i in 1..=n {
            let t = i as f32 / n as f32;
            self.path.line_to(cubic_point(start, c1, c2, end, t));
        }
    }

    /// Circular arc around `(cx, cy)` from `a0` to `a1`.
    ///
    /// Joins the current point to the arc start with a line (or starts a
    /// subpath there). Segment count follows the arc's device-space length.
    pub fn arc(&mut self, cx: f32, cy: f32, r: f32, a0: f32, a1: f32, dir: ArcDirection) {
        if !(r > 0.0 && r.is_finite() && a0.is_finite() && a1.is_finite()) {
            return;
        }
        let t = self.transform();
        let sweep = dir.sweep(a0, a1);
        let n = arc_segments(sweep, r * t.average_scale(), self.config.arc_tessellation);
        let center = Vec2::new(cx, cy);

        self.path.connect_to(t.apply(center.polar(r, a0)), 1e-4);
        for i in 1..=n {
            let a = a0 + sweep * (i as f32 / n as f32);
            self.path.line_to(t.apply(center.polar(r, a)));
        }
    }

    /// Tangent arc: rounds the corner at `(x1, y1)` toward `(x2, y2)`.
    ///
    /// Degenerate input (no radius, collinear points, singular transform)
    /// falls back to a straight line to `(x1, y1)`.
    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, r: f32) {
        let Some(current) = self.path.current_point() else {
            self.move_to(x1, y1);
            return;
        };
        let Some(inverse) = self.transform().inverse() else {
            self.line_to(x1, y1);
            return;
        };

        let p0 = inverse.apply(current);
        let p1 = Vec2::new(x1, y1);
        let p2 = Vec2::new(x2, y2);
        let (Some(v1), Some(v2)) = ((p0 - p1).normalized(1e-6), (p2 - p1).normalized(1e-6)) else {
            self.line_to(x1, y1);
            return;
        };

        let cos = v1.dot(v2).clamp(-1.0, 1.0);
        let theta = cos.acos();
        if !(r > 0.0) || theta < 1e-4 || (PI - theta) < 1e-4 {
            self.line_to(x1, y1);
            return;
        }

        let half = theta * 0.5;
        let tangent_dist = r / half.tan();
        let Some(bisector) = (v1 + v2).normalized(1e-6) else {
            self.line_to(x1, y1);
            return;
        };
        let center = p1 + bisector * (r / half.sin());
        let t1 = p1 + v1 * tangent_dist;
        let t2 = p1 + v2 * tangent_dist;

        let a0 = (t1.y - center.y).atan2(t1.x - center.x);
        let a1 = (t2.y - center.y).atan2(t2.x - center.x);
        let mut da = a1 - a0;
        if da > PI {
            da -= TAU;
        } else if da < -PI {
            da += TAU;
        }
        let dir = if da >= 0.0 {
            ArcDirection::Increasing
        } else {
            ArcDirection::Decreasing
        };

        self.line_to(t1.x, t1.y);
        self.arc(center.x, center.y, r, a0, a0 + da, dir);
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close_path();
    }

    /// Rounded rectangle built from lines and corner arcs. `r` is clamped
    /// to `[0, min(w, h) / 2]`.
    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        let rect = Rect::new(x, y, w, h).normalized();
        let (x, y, w, h) = (rect.origin.x, rect.origin.y, rect.size.x, rect.size.y);
        let r = if r.is_finite() { r.clamp(0.0, w.min(h) * 0.5) } else { 0.0 };
        if r <= 0.0 {
            self.rect(x, y, w, h);
            return;
        }

        let inc = ArcDirection::Increasing;
        self.move_to(x + r, y);
        self.line_to(x + w - r, y);
        self.arc(x + w - r, y + r, r, -FRAC_PI_2, 0.0, inc);
        self.line_to(x + w, y + h - r);
        self.arc(x + w - r, y + h - r, r, 0.0, FRAC_PI_2, inc);
        self.line_to(x + r, y + h);
        self.arc(x + r, y + h - r, r, FRAC_PI_2, PI, inc);
        self.line_to(x, y + r);
        self.arc(x + r, y + r, r, PI, PI + FRAC_PI_2, inc);
        self.close_path();
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32) {
        if !(r > 0.0) {
            return;
        }
        self.move_to(cx + r, cy);
        self.arc(cx, cy, r, 0.0, TAU, ArcDirection::Increasing);
        self.close_path();
    }

    pub fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) {
        self.move_to(cx + rx, cy);
        for i in 1..ELLIPSE_SEGMENTS {
            let a = TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
            self.line_to(cx + a.cos() * rx, cy + a.sin() * ry);
        }
        self.close_path();
    }

    /// A standalone two-point subpath.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.move_to(x1, y1);
        self.line_to(x2, y2);
    }

    // ── rasterization ──────────────────────────────────────────────────

    /// Whether draws are accepted right now. Logs the first rejection.
    fn accepting(&mut self) -> bool {
        if !self.in_frame && !self.warned_outside_frame {
            log::debug!("canvas: draw outside begin_frame/end_frame ignored");
            self.warned_outside_frame = true;
        }
        self.in_frame
    }

    /// Logs the first widget call that had no data to draw.
    pub(super) fn note_empty_data(&mut self, widget: &str) {
        if !self.warned_empty_data {
            log::debug!("canvas: {widget} called without enough data; skipped");
            self.warned_empty_data = true;
        }
    }

    /// Selects the pipeline for subsequent vertices. Same pipeline and
    /// scissor as the open batch is a no-op; anything else seals it.
    pub fn set_pipeline(&mut self, pipeline: PipelineId) {
        if !self.accepting() {
            return;
        }
        let scissor = self.states.current().scissor;
        self.geometry.set_pipeline(pipeline, scissor);
    }

    /// Fills the path as a triangle fan around its centroid (convex paths).
    pub fn fill(&mut self) {
        if self.path.is_empty() || !self.accepting() {
            return;
        }
        let Some(center) = self.path.centroid() else { return };
        let color = self.states.current().fill.to_array();

        self.set_pipeline(PipelineId::Solid);
        let vertex = |p: [f32; 2]| Vertex::new(p, [0.0, 0.0], color);
        for s in self.path.segments() {
            self.geometry.extend([
                vertex([center.x, center.y]),
                vertex([s[0], s[1]]),
                vertex([s[2], s[3]]),
            ]);
        }
    }

    /// Strokes every segment: GPU lines up to `hairline_width`, otherwise
    /// quads `stroke_width` device pixels wide. Degenerate segments are skipped.
    pub fn stroke(&mut self) {
        if self.path.is_empty() || !self.accepting() {
            return;
        }
        let state = *self.states.current();
        let color = state.stroke.to_array();
        let vertex = |p: Vec2| Vertex::new([p.x, p.y], [0.0, 0.0], color);

        if state.stroke_width <= self.config.hairline_width {
            self.set_pipeline(PipelineId::Stroke);
            for s in self.path.segments() {
                let (a, b) = (Vec2::new(s[0], s[1]), Vec2::new(s[2], s[3]));
                if a.distance(b) < DEGENERATE_SEGMENT {
                    continue;
                }
                self.geometry.extend([vertex(a), vertex(b)]);
            }
            return;
        }

        self.set_pipeline(PipelineId::Solid);
        let half_width = state.stroke_width * 0.5;
        for s in self.path.segments() {
            let (a, b) = (Vec2::new(s[0], s[1]), Vec2::new(s[2], s[3]));
            let Some(dir) = (b - a).normalized(DEGENERATE_SEGMENT) else {
                continue;
            };
            let n = dir.perp() * half_width;
            self.geometry.extend([
                vertex(a + n),
                vertex(a - n),
                vertex(b + n),
                vertex(b + n),
                vertex(a - n),
                vertex(b - n),
            ]);
        }
    }

    /// Two triangles over the transformed rect with UV (0,0)-(1,1), in the
    /// fill color. Widget looks come from the pipeline's fragment shader.
    pub fn draw_quad(&mut self, x: f32, y: f32, w: f32, h: f32, pipeline: PipelineId) {
        let color = self.states.current().fill;
        self.quad(x, y, w, h, pipeline, color);
    }

    pub(super) fn quad(&mut self, x: f32, y: f32, w: f32, h: f32, pipeline: PipelineId, color: Color) {
        if w == 0.0 || h == 0.0 || !(w.is_finite() && h.is_finite()) || !self.accepting() {
            return;
        }
        let t = self.transform();
        let c = color.to_array();
        let corner = |u: f32, v: f32| {
            let p = t.apply(Vec2::new(x + w * u, y + h * v));
            Vertex::new([p.x, p.y], [u, v], c)
        };
        let (v00, v10, v11, v01) = (corner(0.0, 0.0), corner(1.0, 0.0), corner(1.0, 1.0), corner(0.0, 1.0));

        self.set_pipeline(pipeline);
        self.geometry.extend([v00, v10, v11, v00, v11, v01]);
    }

    /// A quad of `thickness` centered on the segment, UV.y across it.
    pub(super) fn segment_quad(
        &mut self,
        a: Vec2,
        b: Vec2,
        thickness: f32,
        pipeline: PipelineId,
        color: Color,
    ) {
        let d = b - a;
        let len = d.length();
        if len < DEGENERATE_SEGMENT {
            return;
        }
        self.save();
        self.translate(a.x, a.y);
        self.rotate(d.y.atan2(d.x));
        self.quad(0.0, -thickness * 0.5, len, thickness, pipeline, color);
        self.restore();
    }

    // ── text ───────────────────────────────────────────────────────────

    pub fn font_size(&mut self, size: f32) {
        if size > 0.0 && size.is_finite() {
            self.font_size = size;
        }
    }

    /// Recorded for glyph sources that support faces; box glyphs ignore it.
    pub fn font_face(&mut self, name: &str) {
        self.font_face.clear();
        self.font_face.push_str(name);
    }

    pub fn current_font_size(&self) -> f32 {
        self.font_size
    }

    pub fn current_font_face(&self) -> &str {
        &self.font_face
    }

    pub fn text_width(&self, text: &str) -> f32 {
        self.glyphs.text_width(text, self.font_size)
    }

    /// Draws `text` with its baseline at `y`, in the fill color.
    pub fn text(&mut self, x: f32, y: f32, text: &str) {
        let color = self.states.current().fill;
        self.text_styled(x, y, text, color, None);
    }

    /// Glyph boxes dimmed to 30% with a stem line in full color; `effect`
    /// adds a glow or shadow quad behind each glyph.
    pub(super) fn text_styled(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        color: Color,
        effect: Option<PipelineId>,
    ) {
        if text.is_empty() || !self.accepting() {
            return;
        }
        let mut glyphs = std::mem::take(&mut self.glyph_scratch);
        glyphs.clear();
        self.glyphs.layout(text, self.font_size, &mut glyphs);

        let size = self.font_size;
        self.save();
        for g in &glyphs {
            let r = g.rect;
            let (gx, gy) = (x + r.origin.x, y + r.origin.y);

            if let Some(effect) = effect {
                let pad = size * 0.25;
                self.quad(gx - pad, gy - pad, r.size.x + 2.0 * pad, r.size.y + 2.0 * pad, effect, color);
            }

            self.fill_color(color.dimmed(0.3));
            self.begin_path();
            self.rect(gx, gy, r.size.x, r.size.y);
            self.fill();

            let stem_x = gx + r.size.x * 0.5;
            let mid_y = y - size * 0.4;
            self.stroke_color(color);
            self.stroke_width(1.0);
            self.begin_path();
            self.line(stem_x, mid_y - size * 0.2, stem_x, mid_y + size * 0.2);
            self.stroke();
        }
        self.restore();
        self.begin_path();

        self.glyph_scratch = glyphs;
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

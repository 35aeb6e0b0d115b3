//! Synth widget helpers.
//!
//! Every widget is a handful of [`Canvas::draw_quad`]-style quads on a
//! dedicated pipeline; the fragment shader does the shaping from UV. Values
//! are normalized to `0..=1` and clamped.

use std::f32::consts::PI;

use crate::coords::Vec2;
use crate::paint::Color;
use crate::pipeline::PipelineId;

use super::path::{cubic_point, elevate_quadratic};
use super::Canvas;

const KNOB_START: f32 = 0.75 * PI;
const KNOB_SWEEP: f32 = 1.5 * PI;
/// Alpha offset tagging the knob ring layer; must match `fs_knob_highlight`.
const KNOB_RING_ALPHA: f32 = 2.0;
const VU_SEGMENTS: usize = 10;
const VU_GAP: f32 = 2.0;

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

impl Canvas {
    // ── knobs, wires ───────────────────────────────────────────────────

    /// Knob body, outer ring, value arc over a 270° sweep, and indicator.
    ///
    /// All three layers share [`PipelineId::KnobHighlight`], so a row of
    /// knobs is one draw call. The ring layer's color alpha is
    /// `KNOB_RING_ALPHA` plus the value.
    pub fn draw_knob(&mut self, cx: f32, cy: f32, radius: f32, value: f32, bg: Color, fg: Color) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let value = unit(value);
        let (x, y, d) = (cx - radius, cy - radius, radius * 2.0);
        self.quad(x, y, d, d, PipelineId::KnobHighlight, bg);
        let ring = fg.with_alpha(KNOB_RING_ALPHA + value);
        self.quad(x, y, d, d, PipelineId::KnobHighlight, ring);

        let end = KNOB_START + value * KNOB_SWEEP;
        let center = Vec2::new(cx, cy);
        let (a, b) = (center.polar(radius * 0.3, end), center.polar(radius * 0.8, end));
        self.segment_quad(a, b, 2.0, PipelineId::KnobHighlight, fg);
    }

    /// Knob with a tick ring drawn around it.
    pub fn draw_dial(&mut self, cx: f32, cy: f32, radius: f32, value: f32, color: Color) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let ring = radius * 1.3;
        let tick_color = self.theme().grid;
        self.quad(cx - ring, cy - ring, ring * 2.0, ring * 2.0, PipelineId::DialTicks, tick_color);
        let body = self.theme().surface;
        self.draw_knob(cx, cy, radius, value, body, color);
    }

    pub fn draw_wire(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, thickness: f32) {
        self.segment_quad(
            Vec2::new(x1, y1),
            Vec2::new(x2, y2),
            thickness.max(0.5),
            PipelineId::WireGlow,
            color,
        );
    }

    /// Patch cable sagging by `sag × length` below its midpoint, drawn as
    /// `curve_segments` glowing wire pieces along a quadratic curve.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_cable_with_sag(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        thickness: f32,
        sag: f32,
    ) {
        let (p0, p1) = (Vec2::new(x1, y1), Vec2::new(x2, y2));
        let dist = p0.distance(p1);
        let control = (p0 + p1) * 0.5 + Vec2::new(0.0, dist * sag);
        let (c1, c2) = elevate_quadratic(p0, control, p1);

        let n = self.config().curve_segments.max(1);
        let mut prev = p0;
        for i in 1..=n {
            let next = cubic_point(p0, c1, c2, p1, i as f32 / n as f32);
            self.segment_quad(prev, next, thickness.max(0.5), PipelineId::WireGlow, color);
            prev = next;
        }
    }

    /// Straight link with pulses travelling from the first point to the second.
    pub fn draw_connection(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, thickness: f32) {
        self.segment_quad(
            Vec2::new(x1, y1),
            Vec2::new(x2, y2),
            thickness.max(0.5),
            PipelineId::ConnectionPulse,
            color,
        );
    }

    // ── sliders, meters ────────────────────────────────────────────────

    /// Horizontal slider: inset track, raised fill up to `value`, handle.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_slider(&mut self, x: f32, y: f32, w: f32, h: f32, value: f32, bg: Color, fg: Color) {
        let value = unit(value);
        self.quad(x, y, w, h, PipelineId::SliderTrack, bg);
        if value > 0.0 {
            self.quad(x, y, w * value, h, PipelineId::SliderFill, fg);
        }
        let handle_w = (h * 0.6).max(6.0);
        let hx = x + w * value - handle_w * 0.5;
        self.quad(hx, y - 2.0, handle_w, h + 4.0, PipelineId::SliderHandle, fg.lerp(Color::WHITE, 0.5));
    }

    /// Ten stacked segments lit bottom-up to `level`, colored from `low` to `high`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_vu_meter(&mut self, x: f32, y: f32, w: f32, h: f32, level: f32, low: Color, high: Color) {
        let level = unit(level);
        self.quad(x, y, w, h, PipelineId::Solid, Color::rgb(0.1, 0.1, 0.1));

        let seg_h = h / VU_SEGMENTS as f32;
        for i in 0..VU_SEGMENTS {
            let seg_level = (i + 1) as f32 / VU_SEGMENTS as f32;
            let seg_y = y + h - (i + 1) as f32 * seg_h;
            let color = if seg_level <= level + 1e-6 {
                low.lerp(high, i as f32 / VU_SEGMENTS as f32).with_alpha(1.0)
            } else {
                Color::rgb(0.2, 0.2, 0.2)
            };
            self.quad(
                x + VU_GAP,
                seg_y + VU_GAP * 0.5,
                w - VU_GAP * 2.0,
                seg_h - VU_GAP,
                PipelineId::VuMeter,
                color,
            );
        }
    }

    /// Vertical fader: groove plus a cap positioned by `value` (1 at the top).
    pub fn draw_fader(&mut self, x: f32, y: f32, w: f32, h: f32, value: f32) {
        let value = unit(value);
        let (surface, accent) = (self.theme().surface, self.theme().accent);
        self.quad(x + w * 0.35, y, w * 0.3, h, PipelineId::FaderGroove, surface.dimmed(0.6));
        let cap_h = (h * 0.12).max(8.0).min(h);
        let cap_y = y + (1.0 - value) * (h - cap_h);
        self.quad(x, cap_y, w, cap_h, PipelineId::FaderCap, surface.lerp(accent, 0.15));
    }

    pub fn draw_mod_wheel(&mut self, x: f32, y: f32, w: f32, h: f32, value: f32) {
        let value = unit(value);
        let (surface, accent) = (self.theme().surface, self.theme().accent);
        self.quad(x, y, w, h, PipelineId::ModWheel, surface);
        let marker_y = y + (1.0 - value) * (h - 3.0);
        self.quad(x + 2.0, marker_y, w - 4.0, 3.0, PipelineId::Solid, accent);
    }

    pub fn draw_progress_bar(&mut self, x: f32, y: f32, w: f32, h: f32, value: f32) {
        let value = unit(value);
        let (surface, accent) = (self.theme().surface, self.theme().accent);
        self.quad(x, y, w, h, PipelineId::SliderTrack, surface.dimmed(0.7));
        if value > 0.0 {
            self.quad(x, y, w * value, h, PipelineId::ProgressBar, accent);
        }
    }

    // ── buttons, toggles, panels ───────────────────────────────────────

    /// Beveled button with a centered label. `hover` adds a glow.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_button(&mut self, x: f32, y: f32, w: f32, h: f32, label: &str, pressed: bool, hover: bool) {
        let (surface, text) = (self.theme().surface, self.theme().text);
        let body = if pressed { surface.dimmed(0.8) } else { surface };
        let pipeline = if hover { PipelineId::ButtonHover } else { PipelineId::Button };
        self.quad(x, y, w, h, pipeline, body);

        if !label.is_empty() {
            let offset = if pressed { 1.0 } else { 0.0 };
            let tx = x + (w - self.text_width(label)) * 0.5 + offset;
            let ty = y + h * 0.5 + self.current_font_size() * 0.35 + offset;
            self.text_styled(tx, ty, label, text, None);
        }
    }

    /// Pill switch with its thumb on the right when `on`.
    pub fn draw_toggle(&mut self, x: f32, y: f32, w: f32, h: f32, on: bool) {
        let (surface, accent) = (self.theme().surface, self.theme().accent);
        self.quad(x, y, w, h, PipelineId::ToggleSwitch, if on { accent } else { surface.dimmed(0.7) });

        let inset = 2.0_f32.min(h * 0.25);
        let d = (h - inset * 2.0).max(0.0);
        let tx = if on { x + w - inset - d } else { x + inset };
        self.quad(tx, y + inset, d, d, PipelineId::ToggleThumb, Color::rgb(0.9, 0.9, 0.9));
    }

    pub fn draw_panel(&mut self, x: f32, y: f32, w: f32, h: f32, bordered: bool) {
        let panel = self.theme().panel;
        let pipeline = if bordered { PipelineId::PanelBordered } else { PipelineId::PanelBackground };
        self.quad(x, y, w, h, pipeline, panel);
    }

    pub fn draw_led(&mut self, x: f32, y: f32, w: f32, h: f32, on: bool) {
        let led = self.theme().led;
        if on {
            self.quad(x, y, w, h, PipelineId::LedOn, led);
        } else {
            self.quad(x, y, w, h, PipelineId::LedOff, led.dimmed(0.5));
        }
    }

    // ── envelopes, traces ──────────────────────────────────────────────

    /// ADSR envelope over a grid. `attack`, `decay` and `release` are
    /// relative stage lengths, `sustain` a level; the sustain plateau takes
    /// a fixed share of the width.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_adsr(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
    ) {
        let grid = self.theme().grid.with_alpha(0.6);
        let trace = self.theme().accent;
        self.quad(x, y, w, h, PipelineId::AdsrGrid, grid);

        let (a, d, s, r) = (unit(attack), unit(decay), unit(sustain), unit(release));
        let total = a + d + 1.0 + r;
        let px = |t: f32| x + w * t / total;
        let bottom = y + h;
        let sustain_y = y + (1.0 - s) * h;

        let points = [
            Vec2::new(x, bottom),
            Vec2::new(px(a), y),
            Vec2::new(px(a + d), sustain_y),
            Vec2::new(px(a + d + 1.0), sustain_y),
            Vec2::new(x + w, bottom),
        ];
        for pair in points.windows(2) {
            self.segment_quad(pair[0], pair[1], 4.0, PipelineId::AdsrEnvelope, trace);
        }
    }

    /// Samples in `-1..=1` across the box; `filled` shades down to the center line.
    pub fn draw_waveform(&mut self, x: f32, y: f32, w: f32, h: f32, data: &[f32], filled: bool) {
        if data.len() < 2 {
            self.note_empty_data("draw_waveform");
            return;
        }
        let trace = self.theme().trace;
        if filled {
            let mid = y + h * 0.5;
            let col_w = w / (data.len() - 1) as f32;
            for (i, &v) in data.iter().enumerate() {
                let top = sample_y(y, h, v);
                let cx = x + col_w * i as f32 - col_w * 0.5;
                self.quad(cx, top.min(mid), col_w, (top - mid).abs().max(0.5), PipelineId::WaveformFilled, trace);
            }
        }
        self.trace(x, y, w, h, data, trace);
    }

    /// One bar per bin (`0..=1`), each with a peak cap.
    pub fn draw_spectrum(&mut self, x: f32, y: f32, w: f32, h: f32, data: &[f32]) {
        if data.is_empty() {
            self.note_empty_data("draw_spectrum");
            return;
        }
        let (accent, trace) = (self.theme().accent, self.theme().trace);
        let bar_w = w / data.len() as f32;
        let gap = if bar_w > 3.0 { 1.0 } else { 0.0 };
        for (i, &v) in data.iter().enumerate() {
            let bh = unit(v) * h;
            let bx = x + bar_w * i as f32 + gap * 0.5;
            if bh > 0.0 {
                self.quad(bx, y + h - bh, bar_w - gap, bh, PipelineId::SpectrumBar, trace);
            }
            self.quad(bx, y + h - bh - 2.0, bar_w - gap, 2.0, PipelineId::SpectrumPeak, accent);
        }
    }

    /// Phosphor screen, graticule, and the trace.
    pub fn draw_scope(&mut self, x: f32, y: f32, w: f32, h: f32, data: &[f32]) {
        if data.len() < 2 {
            self.note_empty_data("draw_scope");
            return;
        }
        let (grid, trace) = (self.theme().grid, self.theme().trace);
        self.quad(x, y, w, h, PipelineId::ScopeDisplay, Color::rgb(0.02, 0.08, 0.04));
        self.quad(x, y, w, h, PipelineId::ScopeGrid, grid.with_alpha(0.5));
        self.trace(x, y, w, h, data, trace);
    }

    fn trace(&mut self, x: f32, y: f32, w: f32, h: f32, data: &[f32], color: Color) {
        let step = w / (data.len() - 1).max(1) as f32;
        let point = |i: usize, v: f32| Vec2::new(x + step * i as f32, sample_y(y, h, v));
        for (i, pair) in data.windows(2).enumerate() {
            self.segment_quad(point(i, pair[0]), point(i + 1, pair[1]), 3.0, PipelineId::Waveform, color);
        }
    }

    // ── text effects ───────────────────────────────────────────────────

    pub fn text_glow(&mut self, x: f32, y: f32, text: &str, color: Color) {
        self.text_styled(x, y, text, color, Some(PipelineId::TextGlow));
    }

    pub fn text_shadow(&mut self, x: f32, y: f32, text: &str, color: Color) {
        self.text_styled(x, y, text, color, Some(PipelineId::TextShadow));
    }
}

#[inline]
fn sample_y(y: f32, h: f32, v: f32) -> f32 {
    let v = if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
    y + h * 0.5 * (1.0 - v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCall;

    fn canvas() -> Canvas {
        let mut c = Canvas::default();
        c.begin_frame(800.0, 600.0, 1.0, 0.0);
        c
    }

    fn calls(c: &mut Canvas) -> Vec<DrawCall> {
        c.end_frame().calls().to_vec()
    }

    fn pipelines(c: &mut Canvas) -> Vec<PipelineId> {
        calls(c).into_iter().map(|call| call.pipeline).collect()
    }

    #[test]
    fn knob_body_is_a_highlight_quad_and_state_survives() {
        let mut c = canvas();
        c.fill_color(Color::rgb(0.5, 0.5, 0.5));
        let before = *c.state();
        c.draw_knob(100.0, 100.0, 20.0, 0.5, Color::BLACK, Color::WHITE);
        assert_eq!(*c.state(), before);
        assert!(c.path().is_empty());

        let g = c.end_frame();
        assert_eq!(g.calls().len(), 1);
        assert_eq!(g.calls()[0].pipeline, PipelineId::KnobHighlight);
        assert_eq!(g.calls()[0].vertices.len(), 18);

        let body = &g.vertices()[..6];
        assert!(body.iter().all(|v| v.color == [0.0, 0.0, 0.0, 1.0]));
        let ring = &g.vertices()[6..12];
        assert!(ring.iter().all(|v| v.color == [1.0, 1.0, 1.0, KNOB_RING_ALPHA + 0.5]));
        assert!(g.vertices().iter().all(|v| (0.0..=1.0).contains(&v.uv[0])));
    }

    #[test]
    fn a_row_of_knobs_is_one_draw_call() {
        let mut c = canvas();
        for i in 0..4 {
            c.draw_knob(40.0 + i as f32 * 60.0, 40.0, 20.0, i as f32 / 3.0, Color::BLACK, Color::WHITE);
        }
        let g = c.end_frame();
        assert_eq!(g.calls().len(), 1);
        assert_eq!(g.calls()[0].pipeline, PipelineId::KnobHighlight);
        assert_eq!(g.vertices().len(), 4 * 18);
    }

    #[test]
    fn knob_indicator_points_along_the_value_angle() {
        let mut c = canvas();
        c.draw_knob(0.0, 0.0, 10.0, 0.0, Color::BLACK, Color::WHITE);
        let g = c.end_frame();
        // Last quad is the indicator: from 0.3r to 0.8r at 135°.
        let last = g.vertices()[g.vertices().len() - 6..].to_vec();
        let mid_x = last.iter().map(|v| v.pos[0]).sum::<f32>() / 6.0;
        let mid_y = last.iter().map(|v| v.pos[1]).sum::<f32>() / 6.0;
        let expected = Vec2::zero().polar(5.5, KNOB_START);
        assert!(Vec2::new(mid_x, mid_y).distance(expected) < 1e-3);
    }

    #[test]
    fn vu_meter_draws_background_and_ten_segments() {
        let mut c = canvas();
        c.draw_vu_meter(0.0, 0.0, 20.0, 100.0, 0.35, Color::rgb(0.0, 1.0, 0.0), Color::rgb(1.0, 0.0, 0.0));
        let g = c.end_frame();
        assert_eq!(g.calls().len(), 2);
        assert_eq!(g.calls()[1].pipeline, PipelineId::VuMeter);
        assert_eq!(g.calls()[1].vertices.len(), 60);

        let unlit = [0.2, 0.2, 0.2, 1.0];
        let lit: Vec<bool> = g.vertices()[6..]
            .chunks(6)
            .map(|q| q[0].color != unlit)
            .collect();
        assert_eq!(lit, [true, true, true, false, false, false, false, false, false, false]);
    }

    #[test]
    fn cable_is_tessellated_into_wire_segments() {
        let mut c = canvas();
        c.draw_cable_with_sag(0.0, 0.0, 200.0, 0.0, Color::WHITE, 3.0, 0.3);
        let g = c.end_frame();
        assert_eq!(g.calls().len(), 1);
        assert_eq!(g.calls()[0].pipeline, PipelineId::WireGlow);
        assert_eq!(g.vertices().len(), 20 * 6);
        // Sags downward.
        assert!(g.vertices().iter().any(|v| v.pos[1] > 25.0));
    }

    #[test]
    fn slider_clamps_value() {
        let mut c = canvas();
        c.draw_slider(0.0, 0.0, 100.0, 10.0, 3.0, Color::BLACK, Color::WHITE);
        let g = c.end_frame();
        let fill = &g.vertices()[6..12];
        let max_x = fill.iter().map(|v| v.pos[0]).fold(f32::MIN, f32::max);
        assert_eq!(max_x, 100.0);
        assert_eq!(g.calls().len(), 3);
    }

    #[test]
    fn empty_slider_skips_the_fill() {
        let mut c = canvas();
        c.draw_slider(0.0, 0.0, 100.0, 10.0, 0.0, Color::BLACK, Color::WHITE);
        assert_eq!(pipelines(&mut c), vec![PipelineId::SliderTrack, PipelineId::SliderHandle]);
    }

    #[test]
    fn toggle_thumb_moves_with_state() {
        let thumb_x = |on| {
            let mut c = canvas();
            c.draw_toggle(10.0, 0.0, 40.0, 20.0, on);
            c.end_frame().vertices()[6].pos[0]
        };
        assert_eq!(thumb_x(false), 12.0);
        assert_eq!(thumb_x(true), 32.0);
    }

    #[test]
    fn button_hover_selects_the_hover_pipeline() {
        let mut c = canvas();
        c.draw_button(0.0, 0.0, 80.0, 24.0, "", false, true);
        c.draw_button(0.0, 30.0, 80.0, 24.0, "", true, false);
        assert_eq!(pipelines(&mut c), vec![PipelineId::ButtonHover, PipelineId::Button]);
    }

    #[test]
    fn adsr_draws_four_envelope_stages() {
        let mut c = canvas();
        c.draw_adsr(0.0, 0.0, 200.0, 100.0, 0.2, 0.3, 0.5, 0.4);
        let calls = calls(&mut c);
        assert_eq!(calls[0].pipeline, PipelineId::AdsrGrid);
        assert_eq!(calls[1].pipeline, PipelineId::AdsrEnvelope);
        assert_eq!(calls[1].vertices.len(), 4 * 6);
    }

    #[test]
    fn traces_ignore_missing_data() {
        let mut c = canvas();
        c.draw_waveform(0.0, 0.0, 100.0, 50.0, &[], true);
        c.draw_waveform(0.0, 0.0, 100.0, 50.0, &[0.5], false);
        c.draw_spectrum(0.0, 0.0, 100.0, 50.0, &[]);
        c.draw_scope(0.0, 0.0, 100.0, 50.0, &[]);
        let g = c.end_frame();
        assert!(g.vertices().is_empty());
        assert!(g.calls().is_empty());
    }

    #[test]
    fn waveform_trace_has_one_segment_per_sample_pair() {
        let mut c = canvas();
        c.draw_waveform(0.0, 0.0, 90.0, 50.0, &[0.0, 1.0, -1.0, 0.5], false);
        let calls = calls(&mut c);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].pipeline, PipelineId::Waveform);
        assert_eq!(calls[0].vertices.len(), 3 * 6);
    }

    #[test]
    fn spectrum_alternates_bars_and_peaks() {
        let mut c = canvas();
        c.draw_spectrum(0.0, 0.0, 40.0, 100.0, &[0.5, 1.0]);
        assert_eq!(
            pipelines(&mut c),
            vec![
                PipelineId::SpectrumBar,
                PipelineId::SpectrumPeak,
                PipelineId::SpectrumBar,
                PipelineId::SpectrumPeak,
            ]
        );
    }

    #[test]
    fn scope_layers_screen_grid_and_trace() {
        let mut c = canvas();
        c.draw_scope(0.0, 0.0, 100.0, 60.0, &[0.0, 0.2, 0.4]);
        assert_eq!(
            pipelines(&mut c),
            vec![PipelineId::ScopeDisplay, PipelineId::ScopeGrid, PipelineId::Waveform]
        );
    }

    #[test]
    fn led_panel_fader_and_wheel_use_their_pipelines() {
        let mut c = canvas();
        c.draw_panel(0.0, 0.0, 100.0, 100.0, true);
        c.draw_led(0.0, 0.0, 8.0, 8.0, true);
        c.draw_led(10.0, 0.0, 8.0, 8.0, false);
        c.draw_fader(0.0, 0.0, 20.0, 100.0, 0.5);
        c.draw_mod_wheel(30.0, 0.0, 20.0, 100.0, 0.5);
        c.draw_progress_bar(0.0, 110.0, 100.0, 8.0, 0.25);
        c.draw_dial(50.0, 50.0, 10.0, 0.5, Color::WHITE);
        let ids = pipelines(&mut c);
        for id in [
            PipelineId::PanelBordered,
            PipelineId::LedOn,
            PipelineId::LedOff,
            PipelineId::FaderGroove,
            PipelineId::FaderCap,
            PipelineId::ModWheel,
            PipelineId::ProgressBar,
            PipelineId::DialTicks,
            PipelineId::KnobHighlight,
        ] {
            assert!(ids.contains(&id), "{id:?} missing from {ids:?}");
        }
    }

    #[test]
    fn fader_cap_tracks_value() {
        let cap_top = |v| {
            let mut c = canvas();
            c.draw_fader(0.0, 0.0, 20.0, 100.0, v);
            c.end_frame().vertices()[6].pos[1]
        };
        assert_eq!(cap_top(1.0), 0.0);
        assert_eq!(cap_top(0.0), 88.0);
    }

    #[test]
    fn text_effects_put_an_effect_quad_under_each_glyph() {
        let mut c = canvas();
        c.text_glow(0.0, 20.0, "hi", Color::WHITE);
        c.text_shadow(0.0, 40.0, "x", Color::WHITE);
        let ids = pipelines(&mut c);
        assert_eq!(ids[0], PipelineId::TextGlow);
        assert_eq!(ids.iter().filter(|&&id| id == PipelineId::TextGlow).count(), 2);
        assert_eq!(ids.iter().filter(|&&id| id == PipelineId::TextShadow).count(), 1);
    }

    #[test]
    fn connection_uses_the_pulse_pipeline() {
        let mut c = canvas();
        c.draw_connection(0.0, 0.0, 50.0, 50.0, Color::WHITE, 2.0);
        c.draw_wire(0.0, 0.0, 0.0, 0.0, Color::WHITE, 2.0);
        assert_eq!(pipelines(&mut c), vec![PipelineId::ConnectionPulse]);
    }
}

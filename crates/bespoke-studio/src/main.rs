use std::f32::consts::TAU;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use bespoke_render::canvas::{Canvas, CanvasConfig};
use bespoke_render::device::{SessionConfig, SurfaceSelector};
use bespoke_render::frame::FrameDriver;
use bespoke_render::logging::{init_logging, LoggingConfig};
use bespoke_render::paint::Color;
use bespoke_render::time::{FrameClock, FrameTime};

const TRACE_SAMPLES: usize = 128;
const SPECTRUM_BINS: usize = 32;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut studio = Studio::new();
    event_loop
        .run_app(&mut studio)
        .context("winit event loop terminated with error")?;
    Ok(())
}

struct Studio {
    window: Option<Arc<Window>>,
    driver: FrameDriver,
    clock: FrameClock,
    wave: Vec<f32>,
    spectrum: Vec<f32>,
}

impl Studio {
    fn new() -> Self {
        Self {
            window: None,
            driver: FrameDriver::new(SessionConfig::default(), CanvasConfig::default()),
            clock: FrameClock::new(),
            wave: vec![0.0; TRACE_SAMPLES],
            spectrum: vec![0.0; SPECTRUM_BINS],
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("bespoke studio")
            .with_inner_size(LogicalSize::new(960.0, 600.0));
        let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);

        let started = self
            .driver
            .initialize(SurfaceSelector::Window(Arc::clone(&window)), |result| match result {
                Ok(()) => log::info!("device session ready"),
                Err(e) => log::error!("device session failed: {e}"),
            });
        if !started {
            anyhow::bail!("device negotiation could not start");
        }
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self) {
        let Some(window) = self.window.as_ref() else { return };
        let scale = window.scale_factor() as f32;
        let logical: LogicalSize<f32> = window.inner_size().to_logical(scale as f64);

        let time = self.clock.tick();
        synthesize(&time, &mut self.wave, &mut self.spectrum);

        let (wave, spectrum) = (&self.wave, &self.spectrum);
        self.driver
            .frame(logical.width, logical.height, scale, time.elapsed, |canvas| {
                draw_panel(canvas, time.elapsed, wave, spectrum);
            });
    }
}

impl ApplicationHandler for Studio {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            log::error!("failed to start studio: {e:#}");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        self.driver.poll();
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.driver.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                if self.driver.parked_reason().is_some() {
                    event_loop.exit();
                    return;
                }
                self.redraw();
            }
            _ => {}
        }
    }
}

/// Fake audio: a detuned saw pair and a decaying spectrum.
fn synthesize(time: &FrameTime, wave: &mut [f32], spectrum: &mut [f32]) {
    let t = time.elapsed;
    let n = wave.len() as f32;
    for (i, s) in wave.iter_mut().enumerate() {
        let phase = i as f32 / n * 3.0 + t * 0.7;
        let saw = |p: f32| 2.0 * (p - p.floor()) - 1.0;
        *s = 0.5 * (saw(phase) + saw(phase * 1.01 + 0.25));
    }
    let spectrum_len = spectrum.len();
    for (i, bin) in spectrum.iter_mut().enumerate() {
        let target = (1.0 - i as f32 / spectrum_len as f32) * (0.6 + 0.4 * (t * 3.0 + i as f32).sin().abs());
        *bin = (*bin - time.dt * 1.5).max(target);
    }
}

fn draw_panel(canvas: &mut Canvas, t: f32, wave: &[f32], spectrum: &[f32]) {
    let lfo = |rate: f32, offset: f32| 0.5 + 0.5 * (t * rate + offset).sin();
    let accent = canvas.theme().accent;
    let trace = canvas.theme().trace;

    canvas.draw_panel(16.0, 16.0, 928.0, 568.0, true);
    canvas.fill_color(canvas.theme().text);
    canvas.font_size(18.0);
    canvas.text_glow(36.0, 52.0, "BESPOKE", accent);
    canvas.font_size(12.0);

    // oscillator section
    for (i, label) in ["TUNE", "SHAPE", "CUTOFF", "RES"].iter().enumerate() {
        let cx = 70.0 + i as f32 * 90.0;
        canvas.draw_knob(cx, 120.0, 26.0, lfo(0.4, i as f32), Color::rgb(0.2, 0.2, 0.22), accent);
        canvas.text(cx - canvas.text_width(label) * 0.5, 166.0, label);
    }
    canvas.draw_dial(430.0, 120.0, 24.0, lfo(0.25, 2.0), trace);

    // envelope and traces
    canvas.draw_adsr(36.0, 196.0, 260.0, 120.0, 0.2, 0.35, lfo(0.3, 0.0), 0.5);
    canvas.draw_waveform(316.0, 196.0, 260.0, 120.0, wave, true);
    canvas.draw_scope(596.0, 196.0, 260.0, 120.0, wave);
    canvas.draw_spectrum(36.0, 336.0, 540.0, 100.0, spectrum);

    // mixer strip
    for i in 0..4 {
        let x = 600.0 + i as f32 * 60.0;
        let level = lfo(1.3, i as f32 * 0.8);
        canvas.draw_vu_meter(x, 336.0, 14.0, 100.0, level, trace, Color::rgb(1.0, 0.2, 0.1));
        canvas.draw_fader(x + 20.0, 336.0, 22.0, 100.0, lfo(0.2, i as f32));
        canvas.draw_led(x + 2.0, 446.0, 10.0, 10.0, level > 0.8);
    }
    canvas.draw_mod_wheel(870.0, 336.0, 40.0, 120.0, lfo(0.5, 0.0));

    // controls
    canvas.draw_slider(36.0, 470.0, 240.0, 12.0, lfo(0.15, 0.0), Color::rgb(0.12, 0.12, 0.14), accent);
    canvas.draw_progress_bar(36.0, 500.0, 240.0, 8.0, (t * 0.1).fract());
    canvas.draw_button(300.0, 462.0, 96.0, 28.0, "PLAY", false, lfo(1.0, 0.0) > 0.5);
    canvas.draw_button(408.0, 462.0, 96.0, 28.0, "STOP", true, false);
    canvas.draw_toggle(520.0, 466.0, 44.0, 20.0, (t * 0.5) as u32 % 2 == 0);
    canvas.text_shadow(300.0, 520.0, "patch 01", Color::BLACK);

    // patch cables
    let sway = (t * 0.8).sin() * 0.05;
    canvas.draw_cable_with_sag(70.0, 146.0, 430.0, 146.0, Color::rgb(0.9, 0.2, 0.2), 3.0, 0.3 + sway);
    canvas.draw_cable_with_sag(160.0, 146.0, 870.0, 336.0, Color::rgb(0.2, 0.5, 0.95), 3.0, 0.2);
    canvas.draw_connection(296.0, 256.0, 316.0, 256.0, trace, 2.0);
    canvas.draw_wire(576.0, 256.0, 596.0, 256.0, accent, 2.0);

    // spinning marker on a plain path
    canvas.save();
    canvas.translate(900.0, 60.0);
    canvas.rotate(t % TAU);
    canvas.fill_color(accent.with_alpha(0.8));
    canvas.begin_path();
    canvas.rounded_rect(-10.0, -10.0, 20.0, 20.0, 4.0);
    canvas.fill();
    canvas.restore();
}

use anyhow::Context as _;

use crate::canvas::{Canvas, CanvasConfig};
use crate::coords::Viewport;
use crate::device::{
    DeviceSession, GpuFrame, SessionConfig, SessionError, SessionState, SurfaceSelector,
};
use crate::pipeline::PipelineSet;
use crate::render::{BatchRenderer, RenderCtx, RenderStats};

/// GPU-side resources the driver builds once the session is ready.
enum GpuStage {
    /// Session not ready yet, or never initialized.
    Pending,
    Ready {
        pipelines: PipelineSet,
        renderer: BatchRenderer,
    },
    /// Pipeline construction failed; nothing will be drawn.
    Parked(String),
}

/// Sequences one device frame and one canvas frame per host tick.
///
/// ```text
/// initialize ─► poll … poll ─► begin_frame ─► canvas() draws ─► end_frame
/// ```
///
/// Before the session is ready `begin_frame` returns `false` and the tick is
/// skipped; that is not an error. The canvas is reachable only between
/// `begin_frame` and `end_frame`.
pub struct FrameDriver {
    session_config: SessionConfig,
    session: Option<DeviceSession>,
    gpu: GpuStage,
    canvas: Canvas,
    frame: Option<GpuFrame>,
    last_stats: RenderStats,
}

impl FrameDriver {
    pub fn new(session_config: SessionConfig, canvas_config: CanvasConfig) -> Self {
        Self {
            session_config,
            session: None,
            gpu: GpuStage::Pending,
            canvas: Canvas::new(canvas_config),
            frame: None,
            last_stats: RenderStats::default(),
        }
    }

    /// Starts device negotiation against `selector`.
    ///
    /// Returns whether negotiation is under way. `on_complete` runs exactly
    /// once: later from [`poll`](Self::poll) on success or asynchronous
    /// failure, or before this returns on synchronous failure. A driver
    /// initializes once; further calls report [`SessionError::AlreadyStarted`].
    pub fn initialize(
        &mut self,
        selector: SurfaceSelector,
        on_complete: impl FnOnce(Result<(), SessionError>) + 'static,
    ) -> bool {
        if self.session.is_some() {
            log::warn!("initialize ignored: {}", SessionError::AlreadyStarted);
            on_complete(Err(SessionError::AlreadyStarted));
            return false;
        }
        let session = self
            .session
            .insert(DeviceSession::new(selector, self.session_config.clone()));
        session.begin_initialization(on_complete)
    }

    /// Advances pending adapter/device requests.
    pub fn poll(&mut self) -> Option<SessionState> {
        self.session.as_mut().map(DeviceSession::poll)
    }

    pub fn state(&self) -> Option<SessionState> {
        self.session.as_ref().map(DeviceSession::state)
    }

    pub fn is_ready(&self) -> bool {
        self.session.as_ref().is_some_and(DeviceSession::is_ready)
    }

    pub fn session(&self) -> Option<&DeviceSession> {
        self.session.as_ref()
    }

    /// Why the driver stopped drawing after the session became ready.
    pub fn parked_reason(&self) -> Option<&str> {
        match &self.gpu {
            GpuStage::Parked(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }

    /// Reconfigures the surface for `width`×`height` physical pixels.
    /// Ignored before the session is ready.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(session) = self.session.as_mut() {
            session.configure_surface(width, height);
        }
    }

    /// Opens a frame of `width`×`height` logical pixels.
    ///
    /// Reconfigures the surface if the physical size changed, then acquires
    /// the next texture. Returns `false` (skip this tick) when the session
    /// is not ready, pipelines are unavailable, the size is empty, the
    /// texture is unavailable, or a frame is already open.
    pub fn begin_frame(&mut self, width: f32, height: f32, pixel_ratio: f32, time: f32) -> bool {
        if self.frame.is_some() {
            log::debug!("begin_frame ignored: a frame is already open");
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.is_ready() && !session.poll().is_terminal() {
            return false;
        }
        if !session.is_ready() || !ensure_gpu(&mut self.gpu, session, self.canvas.config()) {
            return false;
        }

        let viewport = Viewport::new(width, height, pixel_ratio);
        if !viewport.is_valid() {
            return false;
        }
        let (pw, ph) = viewport.physical_size();
        session.configure_surface(pw, ph);

        let Some(frame) = session.begin_frame() else {
            return false;
        };
        self.canvas.begin_frame(width, height, pixel_ratio, time);
        self.frame = Some(frame);
        true
    }

    /// The canvas for the open frame; `None` outside a frame.
    pub fn canvas(&mut self) -> Option<&mut Canvas> {
        if self.frame.is_some() {
            Some(&mut self.canvas)
        } else {
            None
        }
    }

    /// Seals the canvas frame, replays it into the render pass, then submits
    /// and presents. No-op without an open frame.
    pub fn end_frame(&mut self) {
        let Some(mut frame) = self.frame.take() else {
            return;
        };
        self.canvas.end_frame();
        let (geometry, uniform) = (self.canvas.geometry(), self.canvas.frame_uniform());
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let (GpuStage::Ready { pipelines, renderer }, Some(device), Some(queue)) =
            (&mut self.gpu, session.device(), session.queue())
        {
            let ctx = RenderCtx::new(device, queue, pipelines, self.canvas.viewport(), frame.size());
            if let Some(pass) = frame.pass_mut() {
                self.last_stats = renderer.render(&ctx, pass, geometry, &uniform);
            }
        }
        session.end_frame(frame);
    }

    /// Runs `draw` inside a frame. Returns whether a frame was drawn.
    pub fn frame(
        &mut self,
        width: f32,
        height: f32,
        pixel_ratio: f32,
        time: f32,
        draw: impl FnOnce(&mut Canvas),
    ) -> bool {
        if !self.begin_frame(width, height, pixel_ratio, time) {
            return false;
        }
        draw(&mut self.canvas);
        self.end_frame();
        true
    }
}

/// Builds pipelines and the renderer the first time the session is ready.
/// Returns whether drawing can proceed.
fn ensure_gpu(gpu: &mut GpuStage, session: &DeviceSession, config: &CanvasConfig) -> bool {
    match gpu {
        GpuStage::Ready { .. } => true,
        GpuStage::Parked(_) => false,
        GpuStage::Pending => {
            let built = PipelineSet::build(session)
                .context("failed to build canvas pipelines")
                .and_then(|pipelines| {
                    let device = session.device().context("device vanished after ready")?;
                    let renderer =
                        BatchRenderer::new(device, &pipelines, config.initial_vertex_capacity);
                    Ok((pipelines, renderer))
                });

            match built {
                Ok((pipelines, renderer)) => {
                    log::info!("canvas pipelines ready ({:?})", pipelines.format());
                    *gpu = GpuStage::Ready { pipelines, renderer };
                    true
                }
                Err(err) => {
                    log::error!("{err:#}");
                    *gpu = GpuStage::Parked(format!("{err:#}"));
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn driver() -> FrameDriver {
        FrameDriver::new(SessionConfig::default(), CanvasConfig::default())
    }

    type Results = Rc<RefCell<Vec<Result<(), SessionError>>>>;

    fn recorder() -> (Results, impl FnOnce(Result<(), SessionError>) + 'static) {
        let results: Results = Rc::default();
        let sink = Rc::clone(&results);
        (results, move |r| sink.borrow_mut().push(r))
    }

    #[test]
    fn uninitialized_driver_skips_frames() {
        let mut d = driver();
        assert!(!d.begin_frame(800.0, 600.0, 1.0, 0.0));
        assert!(d.canvas().is_none());
        assert_eq!(d.state(), None);
        assert!(!d.is_ready());
        d.end_frame();

        let mut drawn = false;
        assert!(!d.frame(800.0, 600.0, 1.0, 0.0, |_| drawn = true));
        assert!(!drawn);
    }

    #[test]
    fn failed_initialization_reports_once_and_never_draws() {
        let mut d = driver();
        let (results, cb) = recorder();
        assert!(!d.initialize(SurfaceSelector::Canvas("#missing".into()), cb));

        for _ in 0..3 {
            d.poll();
            assert!(!d.begin_frame(320.0, 240.0, 2.0, 0.0));
        }
        assert_eq!(results.borrow().len(), 1);
        assert!(results.borrow()[0].is_err());
        assert_eq!(d.state(), Some(SessionState::Failed));
        assert!(d.parked_reason().is_none());
        assert!(d.canvas().is_none());
    }

    #[test]
    fn second_initialize_is_rejected() {
        let mut d = driver();
        let (_, first) = recorder();
        d.initialize(SurfaceSelector::Canvas("#a".into()), first);

        let (results, second) = recorder();
        assert!(!d.initialize(SurfaceSelector::Canvas("#b".into()), second));
        assert_eq!(*results.borrow(), vec![Err(SessionError::AlreadyStarted)]);
    }

    #[test]
    fn resize_before_ready_is_ignored() {
        let mut d = driver();
        d.resize(640, 480);
        assert_eq!(d.last_stats(), RenderStats::default());
    }
}

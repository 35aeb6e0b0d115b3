use std::sync::Arc;

use super::negotiation::{CompletionCallback, LocalFuture, Negotiation, Negotiator, SessionState};
use super::surface::{apply_resize, choose_alpha_mode, choose_surface_format, map_surface_error};
use super::{GpuFrame, SessionConfig, SessionError, SurfaceErrorAction};

/// Where the session presents.
#[derive(Debug, Clone)]
pub enum SurfaceSelector {
    /// A native (or web) winit window.
    Window(Arc<winit::window::Window>),
    /// A CSS selector naming an `HtmlCanvasElement`. Web targets only.
    Canvas(String),
}

/// GPU objects available once negotiation completed.
struct Presentation {
    surface: Arc<wgpu::Surface<'static>>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: (u32, u32),
}

/// wgpu implementation of [`Negotiator`].
pub struct WgpuBackend {
    selector: SurfaceSelector,
    config: SessionConfig,
    initial_size: (u32, u32),
    instance: Option<Arc<wgpu::Instance>>,
    surface: Option<Arc<wgpu::Surface<'static>>>,
    presentation: Option<Presentation>,
}

impl WgpuBackend {
    pub fn new(selector: SurfaceSelector, config: SessionConfig) -> Self {
        Self {
            selector,
            config,
            initial_size: (0, 0),
            instance: None,
            surface: None,
            presentation: None,
        }
    }

    fn instance(&self) -> Result<&Arc<wgpu::Instance>, SessionError> {
        self.instance
            .as_ref()
            .ok_or_else(|| SessionError::Instance("instance not created".into()))
    }

    fn surface(&self) -> Result<&Arc<wgpu::Surface<'static>>, SessionError> {
        self.surface
            .as_ref()
            .ok_or_else(|| SessionError::Surface("surface not created".into()))
    }
}

impl Negotiator for WgpuBackend {
    type Adapter = Arc<wgpu::Adapter>;
    type Device = (wgpu::Device, wgpu::Queue);

    fn create_instance(&mut self) -> Result<(), SessionError> {
        if self.config.backends.is_empty() {
            return Err(SessionError::Instance("no GPU backends enabled".into()));
        }
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.config.backends,
            ..Default::default()
        });
        self.instance = Some(Arc::new(instance));
        Ok(())
    }

    fn create_surface(&mut self) -> Result<(), SessionError> {
        let instance = Arc::clone(self.instance()?);
        let (surface, size) = match &self.selector {
            SurfaceSelector::Window(window) => {
                let size = window.inner_size();
                let surface = instance
                    .create_surface(Arc::clone(window))
                    .map_err(|e| SessionError::Surface(e.to_string()))?;
                (surface, (size.width, size.height))
            }
            SurfaceSelector::Canvas(selector) => canvas_surface(&instance, selector)?,
        };
        self.initial_size = size;
        self.surface = Some(Arc::new(surface));
        Ok(())
    }

    fn request_adapter(&mut self) -> LocalFuture<Result<Self::Adapter, SessionError>> {
        let handles = self
            .instance()
            .and_then(|i| Ok((Arc::clone(i), Arc::clone(self.surface()?))));
        let power_preference = self.config.power_preference;

        Box::pin(async move {
            let (instance, surface) = handles?;
            instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference,
                    compatible_surface: Some(surface.as_ref()),
                    force_fallback_adapter: false,
                })
                .await
                .map(Arc::new)
                .map_err(|e| SessionError::Adapter(e.to_string()))
        })
    }

    fn request_device(
        &mut self,
        adapter: &Self::Adapter,
    ) -> LocalFuture<Result<Self::Device, SessionError>> {
        let adapter = Arc::clone(adapter);
        let required_features = self.config.required_features;
        let required_limits = self.config.required_limits.clone();

        Box::pin(async move {
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("bespoke device"),
                    required_features,
                    required_limits,
                    experimental_features: wgpu::ExperimentalFeatures::disabled(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    trace: wgpu::Trace::Off,
                })
                .await
                .map_err(|e| SessionError::Device(e.to_string()))
        })
    }

    fn on_device_ready(
        &mut self,
        adapter: Self::Adapter,
        (device, queue): Self::Device,
    ) -> Result<(), SessionError> {
        let surface = Arc::clone(self.surface()?);
        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps, self.config.prefer_srgb)
            .ok_or_else(|| SessionError::Surface("adapter reports no surface formats".into()))?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}), surface format {format:?}", info.name, info.backend);

        let size = self.initial_size;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.0.max(1),
            height: size.1.max(1),
            present_mode: self.config.present_mode,
            alpha_mode: choose_alpha_mode(&caps, self.config.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: self.config.desired_maximum_frame_latency,
        };
        if size.0 > 0 && size.1 > 0 {
            surface.configure(&device, &config);
        }

        self.presentation = Some(Presentation {
            surface,
            device,
            queue,
            config,
            size,
        });
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
fn canvas_surface(
    instance: &wgpu::Instance,
    selector: &str,
) -> Result<(wgpu::Surface<'static>, (u32, u32)), SessionError> {
    use wasm_bindgen::JsCast;

    if selector.trim().is_empty() {
        return Err(SessionError::Surface("empty canvas selector".into()));
    }
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| SessionError::Surface("no document available".into()))?;
    let canvas = document
        .query_selector(selector)
        .map_err(|_| SessionError::Surface(format!("invalid canvas selector `{selector}`")))?
        .ok_or_else(|| SessionError::Surface(format!("no element matches `{selector}`")))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| SessionError::Surface(format!("`{selector}` is not a canvas element")))?;

    let size = (canvas.width(), canvas.height());
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| SessionError::Surface(e.to_string()))?;
    Ok((surface, size))
}

#[cfg(not(target_arch = "wasm32"))]
fn canvas_surface(
    _instance: &wgpu::Instance,
    selector: &str,
) -> Result<(wgpu::Surface<'static>, (u32, u32)), SessionError> {
    if selector.trim().is_empty() {
        return Err(SessionError::Surface("empty canvas selector".into()));
    }
    Err(SessionError::Surface(format!(
        "canvas selector `{selector}` is only supported on web targets"
    )))
}

/// The GPU device bound to one presentation surface.
///
/// Owns instance, surface, device and queue exclusively; other components
/// borrow them through [`device`](Self::device) and [`queue`](Self::queue).
pub struct DeviceSession {
    negotiation: Negotiation<WgpuBackend>,
    clear_color: wgpu::Color,
}

impl DeviceSession {
    pub fn new(selector: SurfaceSelector, config: SessionConfig) -> Self {
        let clear_color = config.clear_color.into();
        Self {
            negotiation: Negotiation::new(WgpuBackend::new(selector, config)),
            clear_color,
        }
    }

    /// Starts negotiation. See [`Negotiation::begin`] for the return value.
    pub fn begin_initialization(
        &mut self,
        on_complete: impl FnOnce(Result<(), SessionError>) + 'static,
    ) -> bool {
        let cb: CompletionCallback = Box::new(on_complete);
        self.negotiation.begin(cb)
    }

    /// Advances pending adapter/device requests. Call once per host tick.
    pub fn poll(&mut self) -> SessionState {
        self.negotiation.poll()
    }

    pub fn state(&self) -> SessionState {
        self.negotiation.state()
    }

    pub fn is_ready(&self) -> bool {
        self.negotiation.is_ready()
    }

    pub fn failure(&self) -> Option<&SessionError> {
        self.negotiation.failure()
    }

    fn presentation(&self) -> Option<&Presentation> {
        self.negotiation.negotiator().presentation.as_ref()
    }

    pub fn device(&self) -> Option<&wgpu::Device> {
        self.presentation().map(|p| &p.device)
    }

    pub fn queue(&self) -> Option<&wgpu::Queue> {
        self.presentation().map(|p| &p.queue)
    }

    pub fn surface_format(&self) -> Option<wgpu::TextureFormat> {
        self.presentation().map(|p| p.config.format)
    }

    /// Current drawable size in physical pixels; `(0, 0)` before ready.
    pub fn size(&self) -> (u32, u32) {
        self.presentation().map_or((0, 0), |p| p.size)
    }

    /// Reconfigures the surface for `width`×`height` physical pixels.
    ///
    /// Returns `true` if the surface was reconfigured. Repeating the current
    /// size is a no-op; calling before ready is a no-op.
    pub fn configure_surface(&mut self, width: u32, height: u32) -> bool {
        let Some(p) = self.negotiation.negotiator_mut().presentation.as_mut() else {
            log::debug!("configure_surface ignored: {}", SessionError::NotReady);
            return false;
        };
        let reconfigured = apply_resize(&p.surface, &p.device, &mut p.config, &mut p.size, (width, height));
        if reconfigured {
            log::debug!("surface configured at {width}x{height}");
        }
        reconfigured
    }

    /// Acquires the next surface texture and opens a cleared render pass.
    ///
    /// Returns `None` when not ready, when the surface has zero area, or when
    /// the texture is temporarily unavailable. None of these is an error.
    pub fn begin_frame(&mut self) -> Option<GpuFrame> {
        let p = self.presentation()?;
        if p.size.0 == 0 || p.size.1 == 0 {
            return None;
        }

        let surface_texture = match p.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => {
                log::debug!("surface texture unavailable: {err}");
                let action = map_surface_error(&p.surface, &p.device, &p.config, p.size, err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("surface out of memory; frame skipped");
                }
                return None;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = p
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("bespoke frame encoder"),
            });

        let pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("bespoke canvas pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            })
            .forget_lifetime();

        Some(GpuFrame {
            surface_texture,
            view,
            encoder,
            pass: Some(pass),
        })
    }

    /// Ends the pass, submits, presents, and releases the frame's objects.
    pub fn end_frame(&mut self, mut frame: GpuFrame) {
        drop(frame.pass.take());

        let Some(p) = self.presentation() else {
            return;
        };
        p.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }
}

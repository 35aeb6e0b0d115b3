use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use super::SessionError;

/// Boxed, single-threaded future returned by a [`Negotiator`] hop.
pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Completion handler. Invoked at most once per initialization attempt.
pub type CompletionCallback = Box<dyn FnOnce(Result<(), SessionError>)>;

/// Lifecycle of a device session. States are entered in declaration order
/// and never skipped; `Failed` is reachable from any non-terminal state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SessionState {
    NotStarted,
    InstanceCreated,
    SurfaceCreated,
    AdapterRequested,
    AdapterReady,
    DeviceRequested,
    Ready,
    Failed,
}

impl SessionState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Ready | SessionState::Failed)
    }
}

/// The platform half of device negotiation.
///
/// `create_instance` and `create_surface` are synchronous. Adapter and device
/// requests return futures that the [`Negotiation`] polls from the host's
/// event loop; they must own everything they touch.
pub trait Negotiator {
    type Adapter;
    type Device;

    fn create_instance(&mut self) -> Result<(), SessionError>;

    fn create_surface(&mut self) -> Result<(), SessionError>;

    fn request_adapter(&mut self) -> LocalFuture<Result<Self::Adapter, SessionError>>;

    fn request_device(
        &mut self,
        adapter: &Self::Adapter,
    ) -> LocalFuture<Result<Self::Device, SessionError>>;

    /// Takes ownership of the negotiated objects. An error here fails the
    /// session like any other hop.
    fn on_device_ready(
        &mut self,
        adapter: Self::Adapter,
        device: Self::Device,
    ) -> Result<(), SessionError>;
}

enum Pending<A, D> {
    Idle,
    Adapter(LocalFuture<Result<A, SessionError>>),
    Device(LocalFuture<Result<D, SessionError>>),
}

/// Drives a [`Negotiator`] through the session lifecycle.
///
/// Nothing here blocks: [`begin`](Self::begin) issues the adapter request and
/// returns, and every later hop happens inside [`poll`](Self::poll).
pub struct Negotiation<N: Negotiator> {
    negotiator: N,
    state: SessionState,
    trail: Vec<SessionState>,
    pending: Pending<N::Adapter, N::Device>,
    adapter: Option<N::Adapter>,
    on_complete: Option<CompletionCallback>,
    failure: Option<SessionError>,
}

impl<N: Negotiator> Negotiation<N> {
    pub fn new(negotiator: N) -> Self {
        Self {
            negotiator,
            state: SessionState::NotStarted,
            trail: vec![SessionState::NotStarted],
            pending: Pending::Idle,
            adapter: None,
            on_complete: None,
            failure: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Every state entered so far, starting with `NotStarted`.
    pub fn trail(&self) -> &[SessionState] {
        &self.trail
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn failure(&self) -> Option<&SessionError> {
        self.failure.as_ref()
    }

    pub fn negotiator(&self) -> &N {
        &self.negotiator
    }

    pub fn negotiator_mut(&mut self) -> &mut N {
        &mut self.negotiator
    }

    /// Creates instance and surface, then issues the adapter request.
    ///
    /// Returns `false` if a synchronous step failed (the callback has already
    /// fired with the reason) or if this negotiation was started before (the
    /// callback is dropped without being called).
    pub fn begin(&mut self, on_complete: CompletionCallback) -> bool {
        if self.state != SessionState::NotStarted {
            log::warn!(
                "device session: begin ignored in state {:?} ({})",
                self.state,
                SessionError::AlreadyStarted
            );
            return false;
        }
        self.on_complete = Some(on_complete);

        if let Err(err) = self.negotiator.create_instance() {
            self.fail(err);
            return false;
        }
        self.enter(SessionState::InstanceCreated);

        if let Err(err) = self.negotiator.create_surface() {
            self.fail(err);
            return false;
        }
        self.enter(SessionState::SurfaceCreated);

        self.pending = Pending::Adapter(self.negotiator.request_adapter());
        self.enter(SessionState::AdapterRequested);
        true
    }

    /// Polls the outstanding request once and chains into the next hop when
    /// it resolves. Returns the state after polling.
    pub fn poll(&mut self) -> SessionState {
        let waker = Waker::noop();
        let mut cx = Context::from_waker(waker);

        loop {
            match std::mem::replace(&mut self.pending, Pending::Idle) {
                Pending::Idle => break,
                Pending::Adapter(mut fut) => match fut.as_mut().poll(&mut cx) {
                    Poll::Pending => {
                        self.pending = Pending::Adapter(fut);
                        break;
                    }
                    Poll::Ready(Err(err)) => {
                        self.fail(err);
                        break;
                    }
                    Poll::Ready(Ok(adapter)) => {
                        self.enter(SessionState::AdapterReady);
                        let fut = self.negotiator.request_device(&adapter);
                        self.adapter = Some(adapter);
                        self.pending = Pending::Device(fut);
                        self.enter(SessionState::DeviceRequested);
                    }
                },
                Pending::Device(mut fut) => match fut.as_mut().poll(&mut cx) {
                    Poll::Pending => {
                        self.pending = Pending::Device(fut);
                        break;
                    }
                    Poll::Ready(Err(err)) => {
                        self.fail(err);
                        break;
                    }
                    Poll::Ready(Ok(device)) => {
                        let Some(adapter) = self.adapter.take() else {
                            self.fail(SessionError::Device("adapter released before device".into()));
                            break;
                        };
                        match self.negotiator.on_device_ready(adapter, device) {
                            Ok(()) => {
                                self.enter(SessionState::Ready);
                                log::info!("device session ready");
                                if let Some(cb) = self.on_complete.take() {
                                    cb(Ok(()));
                                }
                            }
                            Err(err) => self.fail(err),
                        }
                        break;
                    }
                },
            }
        }

        self.state
    }

    fn enter(&mut self, next: SessionState) {
        log::debug!("device session: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.trail.push(next);
    }

    fn fail(&mut self, err: SessionError) {
        log::error!("device session failed in state {:?}: {err}", self.state);
        self.pending = Pending::Idle;
        self.adapter = None;
        self.enter(SessionState::Failed);
        self.failure = Some(err.clone());
        if let Some(cb) = self.on_complete.take() {
            cb(Err(err));
        }
    }
}

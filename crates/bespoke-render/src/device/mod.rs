//! Device Session: GPU instance, surface, adapter, device and queue.
//!
//! Negotiation is asynchronous and modeled as an explicit state machine
//! ([`Negotiation`]) over a platform [`Negotiator`]. [`DeviceSession`] is the
//! wgpu-backed session the frame driver owns.

mod config;
mod error;
mod frame;
mod negotiation;
mod session;
mod surface;

pub use config::SessionConfig;
pub use error::{SessionError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use negotiation::{CompletionCallback, LocalFuture, Negotiation, Negotiator, SessionState};
pub use session::{DeviceSession, SurfaceSelector, WgpuBackend};

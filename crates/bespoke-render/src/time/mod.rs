//! Time subsystem.
//!
//! `FrameClock::tick()` yields the delta and the elapsed time that the frame
//! driver pushes into the per-frame shader uniform.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};

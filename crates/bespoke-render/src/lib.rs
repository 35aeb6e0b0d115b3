//! Bespoke synth renderer.
//!
//! An immediate-mode 2D canvas with synth widgets, drawn through one table
//! of wgpu pipelines on a negotiated device session.

pub mod canvas;
pub mod coords;
pub mod device;
pub mod frame;
pub mod logging;
pub mod paint;
pub mod pipeline;
pub mod render;
pub mod time;

#[cfg(test)]
mod test_support;

//! GPU submission of a frame's sealed batches.
//!
//! Convention:
//! - geometry arrives in logical device-space pixels (top-left origin, +Y down)
//! - the vertex shader maps to NDC with the frame uniform's viewport
//! - scissor rects are scaled to physical pixels by the frame's pixel ratio

mod ctx;
mod renderer;

pub use ctx::RenderCtx;
pub use renderer::{scissor_rect, BatchRenderer, RenderStats};

//! Coordinate and geometry types shared by the canvas and the GPU submission path.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Path points are stored in device space, i.e. already multiplied through the
//! current [`Transform`]. The vertex shader converts device space to NDC using
//! the per-frame viewport uniform.

mod rect;
mod transform;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use transform::Transform;
pub use vec2::Vec2;
pub use viewport::Viewport;

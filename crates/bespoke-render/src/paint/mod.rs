//! Color model shared between the canvas and the shaders.
//!
//! Colors travel per vertex in straight (non-premultiplied) alpha and are
//! blended with `SrcAlpha / OneMinusSrcAlpha`.

pub mod color;

pub use color::Color;

//! Vector Canvas: immediate-mode 2D drawing and synth widgets.
//!
//! Convention:
//! - user space is logical pixels, top-left origin, +Y down
//! - path points are transformed to device space when appended
//! - everything a frame draws lands in one [`FrameGeometry`]

mod batch;
mod config;
mod draw;
mod path;
mod state;
mod text;
mod widgets;

pub use batch::{DrawCall, FrameGeometry};
pub use config::{CanvasConfig, WidgetTheme};
pub use draw::Canvas;
pub use path::{ArcDirection, Path};
pub use state::{DrawState, StateStack};
pub use text::{BoxGlyphs, GlyphBox, GlyphSource};

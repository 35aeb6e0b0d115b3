//! Pipeline Set: the fixed table of canvas render pipelines.
//!
//! Convention:
//! - one WGSL module, one vertex stage (`vs_main`), one `fs_*` per look
//! - one vertex layout ([`Vertex`]) and one uniform binding ([`FrameUniform`])

mod error;
mod id;
mod set;
mod shader;
mod vertex;

pub use error::PipelineError;
pub use id::PipelineId;
pub use set::PipelineSet;
pub use shader::{validate_wgsl, CANVAS_WGSL, VERTEX_ENTRY};
pub use vertex::{FrameUniform, Vertex};

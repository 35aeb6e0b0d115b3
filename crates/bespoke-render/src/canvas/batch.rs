use std::ops::Range;

use crate::coords::Rect;
use crate::pipeline::{PipelineId, Vertex};

/// One sealed batch: a vertex range drawn with one pipeline and scissor.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub pipeline: PipelineId,
    /// Device-space clip rect; `None` is unclipped.
    pub scissor: Option<Rect>,
    pub vertices: Range<u32>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct OpenBatch {
    pipeline: PipelineId,
    scissor: Option<Rect>,
    start: usize,
}

/// A frame's vertices and the draw calls that cover them, in call order.
///
/// There is at most one open batch. Changing pipeline or scissor seals it
/// into a [`DrawCall`]; [`flush`](Self::flush) seals it unconditionally.
/// Empty batches never produce a call.
#[derive(Debug, Clone, Default)]
pub struct FrameGeometry {
    vertices: Vec<Vertex>,
    calls: Vec<DrawCall>,
    open: Option<OpenBatch>,
}

impl FrameGeometry {
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            calls: Vec::new(),
            open: None,
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.calls.clear();
        self.open = None;
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Sealed calls. The open batch is not included until flushed.
    #[inline]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Adopts `pipeline` under `scissor`, sealing the open batch if either
    /// differs. Re-selecting the open batch's pipeline is a no-op.
    pub fn set_pipeline(&mut self, pipeline: PipelineId, scissor: Option<Rect>) {
        if let Some(open) = self.open {
            if open.pipeline == pipeline && open.scissor == scissor {
                return;
            }
        }
        self.flush();
        self.open = Some(OpenBatch {
            pipeline,
            scissor,
            start: self.vertices.len(),
        });
    }

    pub fn extend(&mut self, vs: impl IntoIterator<Item = Vertex>) {
        self.vertices.extend(vs);
    }

    /// Seals the open batch.
    pub fn flush(&mut self) {
        let Some(open) = self.open.take() else { return };
        let end = self.vertices.len();
        if end > open.start {
            self.calls.push(DrawCall {
                pipeline: open.pipeline,
                scissor: open.scissor,
                vertices: open.start as u32..end as u32,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v() -> Vertex {
        Vertex::new([0.0, 0.0], [0.0, 0.0], [1.0; 4])
    }

    fn draw(g: &mut FrameGeometry, id: PipelineId) {
        g.set_pipeline(id, None);
        g.extend([v(), v(), v()]);
    }

    #[test]
    fn one_call_per_pipeline_transition() {
        use PipelineId::{Button as B, Solid as A};
        let mut g = FrameGeometry::default();
        for id in [A, A, A, B, B, A] {
            draw(&mut g, id);
        }
        g.flush();

        let pipelines: Vec<_> = g.calls().iter().map(|c| c.pipeline).collect();
        assert_eq!(pipelines, vec![A, B, A]);
        assert_eq!(g.calls()[0].vertices, 0..9);
        assert_eq!(g.calls()[1].vertices, 9..15);
        assert_eq!(g.calls()[2].vertices, 15..18);
    }

    #[test]
    fn calls_cover_every_vertex_in_order() {
        let mut g = FrameGeometry::default();
        for id in [PipelineId::Solid, PipelineId::Stroke, PipelineId::LedOn, PipelineId::Solid] {
            draw(&mut g, id);
        }
        g.flush();

        let mut next = 0;
        for call in g.calls() {
            assert_eq!(call.vertices.start, next);
            next = call.vertices.end;
        }
        assert_eq!(next as usize, g.vertices().len());
    }

    #[test]
    fn scissor_change_seals_the_batch() {
        let mut g = FrameGeometry::default();
        draw(&mut g, PipelineId::Solid);
        g.set_pipeline(PipelineId::Solid, Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
        g.extend([v()]);
        g.flush();
        assert_eq!(g.calls().len(), 2);
        assert_eq!(g.calls()[1].scissor, Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn empty_batches_issue_no_call() {
        let mut g = FrameGeometry::default();
        g.set_pipeline(PipelineId::Solid, None);
        g.set_pipeline(PipelineId::Stroke, None);
        g.flush();
        g.flush();
        assert!(g.calls().is_empty());
    }

    #[test]
    fn open_batch_is_only_visible_after_flush() {
        let mut g = FrameGeometry::default();
        draw(&mut g, PipelineId::Waveform);
        assert!(g.calls().is_empty());
        g.flush();
        assert_eq!(g.calls().len(), 1);
        assert_eq!(g.calls()[0].pipeline, PipelineId::Waveform);
    }
}

use std::future::Future;
use std::pin::pin;
use std::task::{Context, Poll, Waker};

use crate::device::DeviceSession;

use super::shader::{validate_wgsl, CANVAS_WGSL, VERTEX_ENTRY};
use super::{FrameUniform, PipelineError, PipelineId, Vertex};

/// Straight-alpha "over" blending. Canvas colors are not premultiplied.
fn alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Every canvas pipeline, compiled once from one module.
///
/// All pipelines share the vertex stage, the [`Vertex`] layout and the frame
/// uniform bind group layout; they differ only in fragment entry point and,
/// for [`PipelineId::Stroke`], topology. The table is immutable after
/// [`build`](Self::build).
pub struct PipelineSet {
    pipelines: Vec<wgpu::RenderPipeline>,
    bind_group_layout: wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
}

impl PipelineSet {
    /// Builds the set for the session's device and surface format.
    pub fn build(session: &DeviceSession) -> Result<Self, PipelineError> {
        let (Some(device), Some(format)) = (session.device(), session.surface_format()) else {
            return Err(PipelineError::NotReady);
        };
        Self::build_for(device, format)
    }

    pub fn build_for(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> Result<Self, PipelineError> {
        validate_wgsl(CANVAS_WGSL)?;

        // Catches what naga cannot see, such as a format the blend state rejects.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("bespoke canvas shader"),
            source: wgpu::ShaderSource::Wgsl(CANVAS_WGSL.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bespoke frame bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(FrameUniform::min_binding_size()),
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("bespoke canvas pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipelines = PipelineId::ALL
            .iter()
            .map(|&id| create_pipeline(device, &shader, &layout, format, id))
            .collect();

        if let Some(err) = captured_error(scope) {
            return Err(PipelineError::Pipeline(err.to_string()));
        }
        log::debug!("built {} canvas pipelines for {format:?}", PipelineId::COUNT);

        Ok(Self {
            pipelines,
            bind_group_layout,
            format,
        })
    }

    #[inline]
    pub fn get(&self, id: PipelineId) -> &wgpu::RenderPipeline {
        &self.pipelines[id.index()]
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Pops `scope` and polls the result once. Native devices resolve
/// immediately; a browser that has not answered yet counts as clean.
fn captured_error(scope: wgpu::ErrorScopeGuard) -> Option<wgpu::Error> {
    let mut cx = Context::from_waker(Waker::noop());
    match pin!(scope.pop()).poll(&mut cx) {
        Poll::Ready(err) => err,
        Poll::Pending => {
            log::debug!("pipeline error scope still pending; assuming success");
            None
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    id: PipelineId,
) -> wgpu::RenderPipeline {
    let label = format!("bespoke {id:?} pipeline");

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(id.fragment_entry()),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: id.topology(),
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::headless_device;

    #[test]
    fn builds_every_pipeline_for_a_blendable_format() {
        let Some((device, _queue)) = headless_device() else {
            eprintln!("no GPU adapter; skipping");
            return;
        };
        let set = PipelineSet::build_for(&device, wgpu::TextureFormat::Rgba8Unorm)
            .expect("canvas pipelines build");
        assert_eq!(set.format(), wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(set.pipelines.len(), PipelineId::COUNT);
    }

    #[test]
    fn unblendable_target_format_is_reported_not_panicked() {
        let Some((device, _queue)) = headless_device() else {
            eprintln!("no GPU adapter; skipping");
            return;
        };
        let result = PipelineSet::build_for(&device, wgpu::TextureFormat::Rgba32Float);
        assert!(
            matches!(result, Err(PipelineError::Pipeline(_))),
            "expected a captured pipeline error"
        );
    }
}

use super::{PipelineError, PipelineId};

/// WGSL source of the canvas module.
pub const CANVAS_WGSL: &str = include_str!("shaders/canvas.wgsl");

/// Vertex entry point shared by every pipeline.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Parses and validates `source` and checks that every entry point the
/// pipeline table references is present with the right stage.
///
/// wgpu reports shader errors asynchronously through the device; running naga
/// up front turns a broken module into an ordinary `Err` before any pipeline
/// is created.
pub fn validate_wgsl(source: &str) -> Result<naga::Module, PipelineError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| PipelineError::ShaderParse(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| PipelineError::ShaderValidation(e.emit_to_string(source)))?;

    let has = |stage: naga::ShaderStage, name: &str| {
        module
            .entry_points
            .iter()
            .any(|ep| ep.stage == stage && ep.name == name)
    };

    if !has(naga::ShaderStage::Vertex, VERTEX_ENTRY) {
        return Err(PipelineError::MissingEntryPoint {
            stage: "vertex",
            name: VERTEX_ENTRY,
        });
    }
    for id in PipelineId::ALL {
        let name = id.fragment_entry();
        if !has(naga::ShaderStage::Fragment, name) {
            return Err(PipelineError::MissingEntryPoint {
                stage: "fragment",
                name,
            });
        }
    }

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_module_validates() {
        let module = validate_wgsl(CANVAS_WGSL).unwrap();
        let fragments = module
            .entry_points
            .iter()
            .filter(|ep| ep.stage == naga::ShaderStage::Fragment)
            .count();
        // Stroke reuses the solid fragment.
        assert_eq!(fragments, PipelineId::COUNT - 1);
    }

    #[test]
    fn missing_fragment_entry_is_reported() {
        let broken = CANVAS_WGSL.replace("fn fs_mod_wheel(", "fn fs_mod_wheel_renamed(");
        assert_eq!(
            validate_wgsl(&broken).unwrap_err(),
            PipelineError::MissingEntryPoint {
                stage: "fragment",
                name: "fs_mod_wheel",
            }
        );
    }

    #[test]
    fn syntax_errors_fail_before_pipeline_creation() {
        let broken = CANVAS_WGSL.replace("fn fs_solid(in: VsOut)", "fn fs_solid(in VsOut)");
        assert!(matches!(validate_wgsl(&broken), Err(PipelineError::ShaderParse(_))));
    }

    #[test]
    fn type_errors_fail_validation_or_parse() {
        let broken = CANVAS_WGSL.replace("return in.color;", "return in.uv;");
        assert!(validate_wgsl(&broken).is_err());
    }
}

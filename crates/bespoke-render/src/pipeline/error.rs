/// Pipeline set construction failure. Any of these aborts the whole set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("device session is not ready")]
    NotReady,

    #[error("canvas shader failed to parse:\n{0}")]
    ShaderParse(String),

    #[error("canvas shader failed validation:\n{0}")]
    ShaderValidation(String),

    #[error("canvas shader has no {stage} entry point `{name}`")]
    MissingEntryPoint { stage: &'static str, name: &'static str },

    #[error("pipeline creation failed: {0}")]
    Pipeline(String),
}

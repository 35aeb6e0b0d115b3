/// Terminal failure of a device session initialization attempt.
///
/// The `Display` text is the human-readable reason handed to the completion
/// callback. Intermediate GPU objects are not reusable after any of these;
/// start over with a new session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("failed to create GPU instance: {0}")]
    Instance(String),

    #[error("failed to create presentation surface: {0}")]
    Surface(String),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),

    #[error("failed to acquire GPU device: {0}")]
    Device(String),

    #[error("device session is not ready")]
    NotReady,

    #[error("initialization was already started for this session")]
    AlreadyStarted,
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Out of memory; this frame is skipped and the host should expect more.
    Fatal,
}

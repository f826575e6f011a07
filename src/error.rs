//! Error types for startup and parameter editing.

use crate::store::ParamKind;

/// Fatal startup failure. No frame is ticked after one of these.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find a suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("invalid parameter setup: {0}")]
    Params(#[from] ParamError),

    #[error("failed to create recording directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Parameter store and binding errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("unknown parameter '{0}'")]
    Unknown(String),

    #[error("parameter '{0}' is already registered")]
    Duplicate(String),

    #[error("parameter '{name}' holds a {expected:?} value, got {got:?}")]
    KindMismatch {
        name: String,
        expected: ParamKind,
        got: ParamKind,
    },

    #[error("parameter '{0}' received a non-finite value")]
    NonFinite(String),

    #[error("hover override does not match the live parameter set: {0}")]
    SchemaMismatch(String),
}

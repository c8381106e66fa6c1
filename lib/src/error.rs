use thiserror::Error;

/// Reasons a render request is rejected.
///
/// A render either fails here before any pixel work or runs to completion;
/// every numeric operation in the pipeline is clamped, so there is no
/// recoverable mid-render failure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A configuration field is out of range, or a mode/ramp name is unknown.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The source image or sample grid has no cells to render.
    #[error("input has no pixels to render")]
    EmptyInput,
}

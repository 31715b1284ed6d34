/// Failures that prevent a render loop from starting.
///
/// Frame-level failures are not represented here: they are returned per step as
/// `anyhow::Error` and never stop the loop.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to acquire a rendering context for the drawing surface")]
    ContextUnavailable,

    #[error("minimum frame interval must be a finite, non-negative number of milliseconds (got {0})")]
    InvalidPacing(f64),

    #[error("frame rate limit must be a finite, positive number (got {0})")]
    InvalidFrameRate(f64),

    #[error("renderer initialization failed: {0:#}")]
    RendererInit(anyhow::Error),

    #[error("initial renderer resize failed: {0:#}")]
    InitialResize(anyhow::Error),
}

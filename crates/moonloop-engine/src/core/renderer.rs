use anyhow::Result;

/// Capability set consumed by the render loop.
///
/// Calls are never concurrent: the loop and the input forwarding run on the same
/// logical thread, so at most one call is in flight at a time.
pub trait Renderer {
    /// Called exactly once, before the first `resize` and `render`.
    fn init(&mut self) -> Result<()>;

    /// Called once before the first frame and again on every surface size change.
    ///
    /// Dimensions are always positive. Must tolerate repeated identical sizes.
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Produces one frame.
    ///
    /// `time_ms` is non-negative; whether it is a delta or the elapsed time is
    /// chosen by [`RenderTime`].
    fn render(&mut self, time_ms: f64) -> Result<()>;

    /// Key state change. `code` uses the DOM `keyCode` numbering.
    fn input(&mut self, code: u32, pressed: bool) {
        let _ = (code, pressed);
    }

    /// Pointer moved, in logical pixels relative to the surface.
    fn mouse_move(&mut self, x: f64, y: f64) {
        let _ = (x, y);
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn init(&mut self) -> Result<()> {
        (**self).init()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        (**self).resize(width, height)
    }

    fn render(&mut self, time_ms: f64) -> Result<()> {
        (**self).render(time_ms)
    }

    fn input(&mut self, code: u32, pressed: bool) {
        (**self).input(code, pressed)
    }

    fn mouse_move(&mut self, x: f64, y: f64) {
        (**self).mouse_move(x, y)
    }
}

/// What the loop passes to [`Renderer::render`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RenderTime {
    /// Milliseconds since the previous rendered frame.
    #[default]
    Delta,

    /// Milliseconds since the first rendered frame.
    Elapsed,
}

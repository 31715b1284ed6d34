use crate::core::RenderTime;
use crate::time::FramePacing;

/// Render loop configuration.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LoopConfig {
    /// Minimum interval between rendered frames.
    pub pacing: FramePacing,

    /// Whether `render` receives the frame delta or the elapsed time.
    pub render_time: RenderTime,
}

impl LoopConfig {
    pub fn with_pacing(mut self, pacing: FramePacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_render_time(mut self, render_time: RenderTime) -> Self {
        self.render_time = render_time;
        self
    }
}

use crate::core::Renderer;
use crate::device::DrawingSurface;
use crate::driver::{RenderLoop, StepOutcome};

use super::FrameScheduler;

/// Scheduler for loops driven by hand.
///
/// Starts with one frame pending, the one a host schedules right after start.
#[derive(Debug)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            pending: true,
            requests: 0,
        }
    }

    /// Consumes the pending request, if any.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Number of frames requested so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}

/// Summary of a manual run.
#[derive(Debug, Default)]
pub struct ManualRun {
    pub rendered: usize,
    pub skipped: usize,
    /// Frame-level failures, in order. None of them ended the run.
    pub errors: Vec<anyhow::Error>,
}

/// Runs `driver` over `timestamps`, one frame per timestamp.
///
/// Ends early once the loop stops requesting frames.
pub fn run_manual<R, S, I>(driver: &mut RenderLoop<R, S>, timestamps: I) -> ManualRun
where
    R: Renderer,
    S: DrawingSurface,
    I: IntoIterator<Item = f64>,
{
    let mut scheduler = ManualScheduler::new();
    let mut run = ManualRun::default();

    for now in timestamps {
        if !scheduler.take_pending() {
            break;
        }

        match driver.on_frame(&mut scheduler, now) {
            Ok(StepOutcome::Rendered(_)) => run.rendered += 1,
            Ok(StepOutcome::Skipped) => run.skipped += 1,
            Ok(StepOutcome::Stopped) => break,
            Err(e) => {
                log::warn!("frame at {now:.3} ms failed: {e:#}");
                run.errors.push(e);
            }
        }
    }

    run
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;
    use crate::coords::SurfaceSize;
    use crate::driver::LoopConfig;
    use crate::time::FramePacing;

    #[derive(Default)]
    struct CountingRenderer {
        renders: usize,
        fail_every: Option<usize>,
    }

    impl Renderer for CountingRenderer {
        fn init(&mut self) -> Result<()> {
            Ok(())
        }

        fn resize(&mut self, _width: u32, _height: u32) -> Result<()> {
            Ok(())
        }

        fn render(&mut self, _time_ms: f64) -> Result<()> {
            self.renders += 1;
            match self.fail_every {
                Some(n) if self.renders % n == 0 => anyhow::bail!("frame {} failed", self.renders),
                _ => Ok(()),
            }
        }
    }

    struct FixedSurface;

    impl DrawingSurface for FixedSurface {
        fn current_size(&self) -> SurfaceSize {
            SurfaceSize::new(640, 480)
        }

        fn set_backing_size(&mut self, _size: SurfaceSize) {}
    }

    fn driver(renderer: CountingRenderer, pacing: FramePacing) -> RenderLoop<CountingRenderer, FixedSurface> {
        RenderLoop::start(renderer, FixedSurface, LoopConfig::default().with_pacing(pacing)).unwrap()
    }

    #[test]
    fn scheduler_starts_pending() {
        let mut scheduler = ManualScheduler::new();
        assert!(scheduler.take_pending());
        assert!(!scheduler.take_pending());
        scheduler.request_frame();
        assert!(scheduler.take_pending());
        assert_eq!(scheduler.requests(), 1);
    }

    #[test]
    fn counts_rendered_and_skipped_frames() {
        let mut lp = driver(CountingRenderer::default(), FramePacing::MinInterval(33.3));
        let run = run_manual(&mut lp, [0.0, 16.0, 35.0, 50.0]);
        assert_eq!(run.rendered, 2);
        assert_eq!(run.skipped, 2);
        assert!(run.errors.is_empty());
    }

    #[test]
    fn failures_are_collected_and_loop_continues() {
        let renderer = CountingRenderer {
            fail_every: Some(2),
            ..Default::default()
        };
        let mut lp = driver(renderer, FramePacing::Uncapped);
        let run = run_manual(&mut lp, (0..6).map(|i| i as f64 * 16.0));
        assert_eq!(lp.renderer().renders, 6);
        assert_eq!(run.rendered, 3);
        assert_eq!(run.errors.len(), 3);
    }

    #[test]
    fn stops_when_loop_is_stopped() {
        let mut lp = driver(CountingRenderer::default(), FramePacing::Uncapped);
        lp.stop();
        let run = run_manual(&mut lp, [0.0, 16.0]);
        assert_eq!(run.rendered, 0);
        assert_eq!(lp.renderer().renders, 0);
    }
}

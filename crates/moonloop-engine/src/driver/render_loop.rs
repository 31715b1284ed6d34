use anyhow::{Context, Result};

use crate::coords::{SurfaceSize, ViewportState};
use crate::core::{RenderTime, Renderer};
use crate::device::DrawingSurface;
use crate::error::DriverError;
use crate::host::FrameScheduler;
use crate::input::InputEvent;
use crate::time::{FrameClock, FrameTime};

use super::config::LoopConfig;
use super::control::{FrameRateSink, StopHandle};

/// Result of one frame step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StepOutcome {
    /// The renderer produced a frame.
    Rendered(FrameTime),
    /// The pacing gate dropped the frame; nothing was called or mutated.
    Skipped,
    /// The loop was stopped; no frame was requested or run.
    Stopped,
}

/// Drives a [`Renderer`] against a [`DrawingSurface`].
///
/// One instance per session. The loop owns the renderer so every call into it,
/// from frames or forwarded input, is sequenced through `&mut self`.
pub struct RenderLoop<R, S> {
    renderer: R,
    surface: S,
    clock: FrameClock,
    viewport: ViewportState,
    render_time: RenderTime,
    frame_rate: Option<Box<dyn FrameRateSink>>,
    stop: StopHandle,
}

impl<R, S> RenderLoop<R, S>
where
    R: Renderer,
    S: DrawingSurface,
{
    /// Initializes the renderer and applies the current surface size.
    ///
    /// Order: context check, `init`, backing size, viewport, `resize`. No frame
    /// is run; the host schedules the first one after this returns.
    pub fn start(mut renderer: R, mut surface: S, config: LoopConfig) -> Result<Self, DriverError> {
        let pacing = config.pacing.validate()?;

        if !surface.has_context() {
            log::error!("drawing surface has no rendering context; render loop not started");
            return Err(DriverError::ContextUnavailable);
        }

        renderer.init().map_err(DriverError::RendererInit)?;

        let size = surface.current_size().clamped();
        surface.set_backing_size(size);
        let viewport = ViewportState::new(size);
        renderer
            .resize(size.width, size.height)
            .map_err(DriverError::InitialResize)?;

        log::info!(
            "render loop started at {size} (min frame interval {:.3} ms)",
            pacing.min_interval_ms()
        );

        Ok(Self {
            renderer,
            surface,
            clock: FrameClock::new(pacing),
            viewport,
            render_time: config.render_time,
            frame_rate: None,
            stop: StopHandle::new(),
        })
    }

    /// Publishes `1000 / delta` to `sink` after every rendered frame.
    pub fn with_frame_rate_sink(mut self, sink: impl FrameRateSink + 'static) -> Self {
        self.frame_rate = Some(Box::new(sink));
        self
    }

    /// Host entry point for a scheduled frame.
    ///
    /// The next frame is requested before any work, so a failing step never
    /// halts scheduling. A stopped loop neither requests nor steps.
    pub fn on_frame<F>(&mut self, scheduler: &mut F, now_ms: f64) -> Result<StepOutcome>
    where
        F: FrameScheduler + ?Sized,
    {
        if self.stop.is_stopped() {
            return Ok(StepOutcome::Stopped);
        }

        scheduler.request_frame();
        self.step(now_ms)
    }

    /// Runs one frame step at `now_ms`: pacing gate, viewport sync, render.
    ///
    /// Renderer failures are returned, not retried. The clock has already
    /// advanced by then, so the next step paces from this one.
    pub fn step(&mut self, now_ms: f64) -> Result<StepOutcome> {
        let Some(time) = self.clock.tick(now_ms) else {
            log::trace!("frame at {now_ms:.3} ms paced out");
            return Ok(StepOutcome::Skipped);
        };

        self.sync_viewport()?;

        let arg = match self.render_time {
            RenderTime::Delta => time.delta_ms,
            RenderTime::Elapsed => time.elapsed_ms,
        };
        self.renderer
            .render(arg)
            .with_context(|| format!("render failed on frame {}", time.frame_index))?;

        if let (Some(sink), Some(fps)) = (self.frame_rate.as_mut(), time.frames_per_second()) {
            sink.publish(fps);
        }

        Ok(StepOutcome::Rendered(time))
    }

    fn sync_viewport(&mut self) -> Result<()> {
        let Some(size) = self.viewport.observe(self.surface.current_size()) else {
            return Ok(());
        };

        self.surface.set_backing_size(size);
        self.viewport.apply(size);
        log::debug!("viewport resized to {size}");

        self.renderer
            .resize(size.width, size.height)
            .with_context(|| format!("resize to {size} failed"))
    }

    /// Forwards a key state change immediately.
    pub fn key(&mut self, code: u32, pressed: bool) {
        self.renderer.input(code, pressed);
    }

    /// Forwards a pointer move immediately.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.renderer.mouse_move(x, y);
    }

    pub fn forward(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { code, pressed } => self.key(code, pressed),
            InputEvent::PointerMoved { x, y } => self.pointer_moved(x, y),
        }
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn viewport(&self) -> SurfaceSize {
        self.viewport.size()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

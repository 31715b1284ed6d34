//! Native host: a winit window driving one render loop.
//!
//! Redraws are requested from inside each frame callback, before the frame runs,
//! so the window keeps animating even when a frame fails. A frame dropped by the
//! pacing gate parks the event loop until the next frame is due instead of
//! redrawing straight away.
//!
//! There is no separate context check here: the GPU belongs to the renderer, so
//! a machine without a usable adapter fails in `Renderer::init` and is reported
//! as [`DriverError::RendererInit`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::coords::SurfaceSize;
use crate::core::Renderer;
use crate::device::DrawingSurface;
use crate::driver::{LoopConfig, RenderLoop, StepOutcome};
use crate::error::DriverError;
use crate::input::Key;
use crate::time::{MonotonicClock, TimeSource};

/// Window/host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub loop_config: LoopConfig,
    /// Append the instantaneous frame rate to the window title.
    pub show_frame_rate: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "moonloop".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            loop_config: LoopConfig::default(),
            show_frame_rate: true,
        }
    }
}

/// A winit window seen as a drawing surface.
///
/// The swapchain belongs to the renderer, so the backing size is only recorded
/// here; the renderer reconfigures its surface in `resize`. `has_context` keeps
/// its default of `true` for the same reason.
pub struct WindowSurface {
    window: Arc<Window>,
    backing: SurfaceSize,
}

impl WindowSurface {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            backing: SurfaceSize::default(),
        }
    }

    pub fn backing_size(&self) -> SurfaceSize {
        self.backing
    }
}

impl DrawingSurface for WindowSurface {
    fn current_size(&self) -> SurfaceSize {
        let size = self.window.inner_size();
        SurfaceSize::new(size.width, size.height)
    }

    fn set_backing_size(&mut self, size: SurfaceSize) {
        self.backing = size;
    }
}

/// Entry point for the native host.
pub struct NativeHost;

impl NativeHost {
    /// Opens a window, builds the renderer with `factory` and runs until the
    /// window closes.
    ///
    /// Startup failures (window, renderer construction, `init`) are fatal and
    /// returned after the event loop exits.
    pub fn run<R, F>(config: HostConfig, factory: F) -> Result<()>
    where
        R: Renderer + 'static,
        F: FnOnce(Arc<Window>) -> Result<R>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState::new(config, factory);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct Session<R> {
    window: Arc<Window>,
    driver: RenderLoop<R, WindowSurface>,
}

struct HostState<R, F> {
    config: HostConfig,
    factory: Option<F>,
    session: Option<Session<R>>,
    clock: MonotonicClock,
    /// Wake-up for a frame the pacing gate dropped.
    redraw_at: Option<Instant>,
    startup_error: Option<anyhow::Error>,
}

impl<R, F> HostState<R, F>
where
    R: Renderer + 'static,
    F: FnOnce(Arc<Window>) -> Result<R>,
{
    fn new(config: HostConfig, factory: F) -> Self {
        Self {
            config,
            factory: Some(factory),
            session: None,
            clock: MonotonicClock::new(),
            redraw_at: None,
            startup_error: None,
        }
    }

    fn start_session(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let factory = self
            .factory
            .take()
            .context("renderer factory already consumed")?;

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let renderer = factory(Arc::clone(&window)).context("failed to create renderer")?;
        let surface = WindowSurface::new(Arc::clone(&window));
        let mut driver = RenderLoop::start(renderer, surface, self.config.loop_config)?;

        if self.config.show_frame_rate {
            let title_window = Arc::clone(&window);
            let title = self.config.title.clone();
            driver = driver.with_frame_rate_sink(move |fps: f64| {
                title_window.set_title(&format!("{title} - {fps:.0} fps"));
            });
        }

        window.request_redraw();
        self.session = Some(Session { window, driver });
        Ok(())
    }

    fn fail_startup(&mut self, event_loop: &ActiveEventLoop, e: anyhow::Error) {
        log::error!("{}", startup_notice(&e));
        self.startup_error = Some(e);
        event_loop.exit();
    }

    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let now = self.clock.now_ms();
        let mut requested = false;
        let mut schedule = || requested = true;
        let outcome = session.driver.on_frame(&mut schedule, now);

        match outcome {
            Ok(StepOutcome::Stopped) => {
                event_loop.exit();
                return;
            }
            Ok(StepOutcome::Skipped) => {
                let due = session.driver.clock().next_frame_due();
                if let Some(delay) = redraw_delay(due, now) {
                    self.redraw_at = Some(Instant::now() + delay);
                    return;
                }
            }
            Ok(StepOutcome::Rendered(_)) => {}
            Err(e) => log::warn!("frame failed: {e:#}"),
        }

        if requested {
            self.redraw_at = None;
            session.window.request_redraw();
        }
    }
}

/// Message logged when the session cannot start.
fn startup_notice(e: &anyhow::Error) -> String {
    match e.downcast_ref::<DriverError>() {
        Some(DriverError::RendererInit(cause)) => {
            format!("no usable rendering context (GPU adapter or surface): {cause:#}")
        }
        Some(DriverError::ContextUnavailable) => "no usable rendering context".to_string(),
        _ => format!("render loop failed to start: {e:#}"),
    }
}

/// Time left until `due_ms`, or `None` when the frame may run now.
fn redraw_delay(due_ms: Option<f64>, now_ms: f64) -> Option<Duration> {
    let remaining = due_ms? - now_ms;
    (remaining > 0.0).then(|| Duration::from_secs_f64(remaining / 1000.0))
}

impl<R, F> ApplicationHandler for HostState<R, F>
where
    R: Renderer + 'static,
    F: FnOnce(Arc<Window>) -> Result<R>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(session) = &self.session {
            session.window.request_redraw();
            return;
        }

        if let Err(e) = self.start_session(event_loop) {
            self.fail_startup(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let flow = match self.redraw_at {
            Some(deadline) if deadline > Instant::now() => ControlFlow::WaitUntil(deadline),
            Some(_) => {
                self.redraw_at = None;
                if let Some(session) = &self.session {
                    session.window.request_redraw();
                }
                ControlFlow::Wait
            }
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(flow);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                session.driver.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                // Picked up by the per-frame viewport check.
                session.window.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = map_key(event.physical_key) {
                    let pressed = event.state == ElementState::Pressed;
                    session.driver.key(key.code(), pressed);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = to_logical(&session.window, position);
                session.driver.pointer_moved(x, y);
            }

            WindowEvent::RedrawRequested => self.run_frame(event_loop),

            _ => {}
        }
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> (f64, f64) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x, logical.y)
}

fn map_key(pk: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = pk else {
        // NativeKeyCode carries no stable DOM equivalent.
        return None;
    };

    let key = match code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,

        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowDown => Key::ArrowDown,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        _ => return None,
    };

    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_dom_codes() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyW)).map(Key::code), Some(87));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ArrowUp)).map(Key::code), Some(38));
    }

    #[test]
    fn both_shift_keys_are_shift() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftLeft)), Some(Key::Shift));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)), Some(Key::Shift));
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumLock)), None);
    }

    #[test]
    fn early_frame_waits_for_the_remaining_interval() {
        let delay = redraw_delay(Some(133.3), 110.0).unwrap();
        assert!((delay.as_secs_f64() - 0.0233).abs() < 1e-9);
    }

    #[test]
    fn due_or_overdue_frame_redraws_at_once() {
        assert_eq!(redraw_delay(Some(100.0), 100.0), None);
        assert_eq!(redraw_delay(Some(100.0), 150.0), None);
        assert_eq!(redraw_delay(None, 10.0), None);
    }

    #[test]
    fn renderer_init_failure_is_reported_as_missing_context() {
        let e = anyhow::Error::new(DriverError::RendererInit(anyhow::anyhow!("no adapter")));
        let notice = startup_notice(&e);
        assert!(notice.starts_with("no usable rendering context"));
        assert!(notice.contains("no adapter"));
    }

    #[test]
    fn other_startup_failures_keep_their_cause() {
        let e = anyhow::anyhow!("failed to create window");
        assert_eq!(startup_notice(&e), "render loop failed to start: failed to create window");
    }

    #[test]
    fn default_config_shows_frame_rate() {
        let config = HostConfig::default();
        assert!(config.show_frame_rate);
        assert_eq!(config.loop_config, LoopConfig::default());
    }
}

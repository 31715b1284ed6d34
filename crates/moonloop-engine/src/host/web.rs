//! Browser host: a canvas driven by `requestAnimationFrame`.
//!
//! Everything runs on the page's main thread. Closures handed to the DOM are
//! leaked on purpose; the loop lives as long as the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Performance, Window};

use crate::coords::SurfaceSize;
use crate::core::Renderer;
use crate::device::DrawingSurface;
use crate::driver::{LoopConfig, RenderLoop};
use crate::host::FrameScheduler;
use crate::logging::{init_logging, LoggingConfig};
use crate::time::TimeSource;

/// Browser host configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// `id` of the `<canvas>` to draw into.
    pub canvas_id: String,
    /// `id` of an element whose text shows the frame rate.
    pub fps_counter_id: Option<String>,
    pub loop_config: LoopConfig,
    /// Console logger installed by [`start`] unless the page set one up first.
    pub logging: LoggingConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            fps_counter_id: Some("fpsCounter".to_string()),
            loop_config: LoopConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// `performance.now()` as a time source.
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> Result<Self, JsValue> {
        let performance = window
            .performance()
            .ok_or_else(|| JsValue::from_str("window.performance is unavailable"))?;
        Ok(Self { performance })
    }
}

impl TimeSource for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}

/// A canvas sized to the browser window.
pub struct CanvasSurface {
    window: Window,
    canvas: HtmlCanvasElement,
    has_context: bool,
}

impl CanvasSurface {
    /// Wraps `canvas` and checks for a `webgl2` context.
    pub fn new(window: Window, canvas: HtmlCanvasElement) -> Self {
        let has_context = matches!(canvas.get_context("webgl2"), Ok(Some(_)));
        Self {
            window,
            canvas,
            has_context,
        }
    }

    fn window_dimension(value: Result<JsValue, JsValue>) -> Option<u32> {
        value.ok()?.as_f64().map(|v| v.max(0.0) as u32)
    }
}

impl DrawingSurface for CanvasSurface {
    fn current_size(&self) -> SurfaceSize {
        let width = Self::window_dimension(self.window.inner_width());
        let height = Self::window_dimension(self.window.inner_height());
        match (width, height) {
            (Some(w), Some(h)) => SurfaceSize::new(w, h),
            _ => SurfaceSize::new(self.canvas.width(), self.canvas.height()),
        }
    }

    fn set_backing_size(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);

        let style = self.canvas.style();
        for (property, px) in [("width", size.width), ("height", size.height)] {
            if let Err(e) = style.set_property(property, &format!("{px}px")) {
                log::warn!("failed to set canvas style {property}: {e:?}");
            }
        }
    }

    fn has_context(&self) -> bool {
        self.has_context
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct AnimationFrameScheduler<'a> {
    window: &'a Window,
    callback: &'a FrameCallback,
}

impl FrameScheduler for AnimationFrameScheduler<'_> {
    fn request_frame(&mut self) {
        if let Some(cb) = self.callback.borrow().as_ref() {
            if let Err(e) = self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {e:?}");
            }
        }
    }
}

/// Starts the render loop on the configured canvas.
///
/// A missing `webgl2` context or a failing renderer `init` is reported with
/// `alert` and the loop never starts.
pub fn start<R>(renderer: R, config: WebConfig) -> Result<(), JsValue>
where
    R: Renderer + 'static,
{
    init_logging(config.logging.clone());

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document on window"))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(&config.canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", config.canvas_id)))?
        .dyn_into()?;

    let counter: Option<HtmlElement> = config
        .fps_counter_id
        .as_deref()
        .and_then(|id| document.get_element_by_id(id))
        .and_then(|el| el.dyn_into().ok());

    let surface = CanvasSurface::new(window.clone(), canvas.clone());
    let driver = match RenderLoop::start(renderer, surface, config.loop_config) {
        Ok(driver) => driver,
        Err(e) => {
            let message = e.to_string();
            log::error!("render loop failed to start: {message}");
            if let Err(alert_err) = window.alert_with_message(&message) {
                log::warn!("alert failed: {alert_err:?}");
            }
            return Err(JsValue::from_str(&message));
        }
    };

    let driver = match counter {
        Some(counter) => driver.with_frame_rate_sink(move |fps: f64| {
            counter.set_inner_text(&format!("{}", fps.round()));
        }),
        None => driver,
    };

    let driver = Rc::new(RefCell::new(driver));
    install_input_listeners(&canvas, &driver)?;

    let clock = PerformanceClock::new(&window)?;
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let frame_callback = Rc::clone(&callback);
    let frame_window = window.clone();

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut scheduler = AnimationFrameScheduler {
            window: &frame_window,
            callback: &frame_callback,
        };
        let now = clock.now_ms();
        if let Err(e) = driver.borrow_mut().on_frame(&mut scheduler, now) {
            log::warn!("frame failed: {e:#}");
        }
    }) as Box<dyn FnMut()>));

    // Every later frame is requested by the previous one.
    let mut scheduler = AnimationFrameScheduler {
        window: &window,
        callback: &callback,
    };
    scheduler.request_frame();

    Ok(())
}

fn install_input_listeners<R>(
    canvas: &HtmlCanvasElement,
    driver: &Rc<RefCell<RenderLoop<R, CanvasSurface>>>,
) -> Result<(), JsValue>
where
    R: Renderer + 'static,
{
    for (event, pressed) in [("keydown", true), ("keyup", false)] {
        let driver = Rc::clone(driver);
        let listener = Closure::wrap(Box::new(move |ev: KeyboardEvent| {
            driver.borrow_mut().key(ev.key_code(), pressed);
        }) as Box<dyn FnMut(KeyboardEvent)>);
        canvas.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
        listener.forget();
    }

    let driver = Rc::clone(driver);
    let listener = Closure::wrap(Box::new(move |ev: MouseEvent| {
        driver
            .borrow_mut()
            .pointer_moved(f64::from(ev.client_x()), f64::from(ev.client_y()));
    }) as Box<dyn FnMut(MouseEvent)>);
    canvas.add_event_listener_with_callback("mousemove", listener.as_ref().unchecked_ref())?;
    listener.forget();

    Ok(())
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn detached_canvas() -> (Window, HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let canvas = window
            .document()
            .unwrap()
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        (window, canvas)
    }

    #[wasm_bindgen_test]
    fn backing_size_sets_buffer_and_css_size() {
        let (window, canvas) = detached_canvas();
        let mut surface = CanvasSurface::new(window, canvas.clone());

        surface.set_backing_size(SurfaceSize::new(640, 480));

        assert_eq!((canvas.width(), canvas.height()), (640, 480));
        let style = canvas.style();
        assert_eq!(style.get_property_value("width").unwrap(), "640px");
        assert_eq!(style.get_property_value("height").unwrap(), "480px");
    }

    #[wasm_bindgen_test]
    fn console_logger_is_installed_once() {
        init_logging(LoggingConfig {
            level: log::Level::Debug,
        });
        init_logging(LoggingConfig {
            level: log::Level::Error,
        });

        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        log::warn!("frame failed: reached the console");
    }

    #[wasm_bindgen_test]
    fn performance_clock_is_positive() {
        let window = web_sys::window().unwrap();
        let clock = PerformanceClock::new(&window).unwrap();
        assert!(clock.now_ms() > 0.0);
    }
}

use std::sync::Arc;

use anyhow::{Context, Result};
use moonloop_engine::core::Renderer;
use moonloop_engine::input::{InputEvent, Key, KeyboardState};
use winit::window::Window;

use crate::gpu::{SurfacePrefs, WindowGpu};

/// Hue drift per millisecond when no key is held.
const HUE_DRIFT: f32 = 0.000_05;
/// Extra hue change per millisecond while A/D is held.
const HUE_STEER: f32 = 0.000_5;

/// Renderer that clears the window to a slowly shifting colour.
///
/// A/D steer the hue, W/S the saturation; the pointer's vertical position sets
/// the brightness.
pub struct ClearRenderer {
    window: Arc<Window>,
    prefs: SurfacePrefs,
    gpu: Option<WindowGpu>,
    keyboard: KeyboardState,
    size: (u32, u32),
    hue: f32,
    saturation: f32,
}

impl ClearRenderer {
    pub fn new(window: Arc<Window>, prefs: SurfacePrefs) -> Self {
        Self {
            window,
            prefs,
            gpu: None,
            keyboard: KeyboardState::new(),
            size: (1, 1),
            hue: 0.0,
            saturation: 0.6,
        }
    }

    fn gpu(&mut self) -> Result<&mut WindowGpu> {
        self.gpu.as_mut().context("renderer used before init")
    }

    fn advance(&mut self, delta_ms: f32) {
        let steer = self.keyboard.axis(Key::A, Key::D);
        self.hue = (self.hue + delta_ms * (HUE_DRIFT + steer * HUE_STEER)).rem_euclid(1.0);

        let lift = self.keyboard.axis(Key::S, Key::W);
        self.saturation = (self.saturation + lift * delta_ms * 0.001).clamp(0.0, 1.0);
    }

    fn brightness(&self) -> f32 {
        match self.keyboard.pointer_pos() {
            Some((_, y)) => {
                let height = self.size.1.max(1) as f64;
                (1.0 - (y / height).clamp(0.0, 1.0)) as f32 * 0.8 + 0.2
            }
            None => 0.6,
        }
    }
}

impl Renderer for ClearRenderer {
    fn init(&mut self) -> Result<()> {
        let gpu = pollster::block_on(WindowGpu::new(Arc::clone(&self.window), self.prefs.clone()))?;
        self.gpu = Some(gpu);
        log::info!("clear renderer initialized");
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.size = (width, height);
        self.gpu()?.resize(width, height);
        Ok(())
    }

    fn render(&mut self, time_ms: f64) -> Result<()> {
        self.advance(time_ms as f32);
        let [r, g, b] = hsv_to_rgb(self.hue, self.saturation, self.brightness());

        let window = Arc::clone(&self.window);
        let gpu = self.gpu()?;

        let Some(mut frame) = gpu.acquire()? else {
            return Ok(());
        };

        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("moonloop clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        window.pre_present_notify();
        gpu.present(frame);
        Ok(())
    }

    fn input(&mut self, code: u32, pressed: bool) {
        self.keyboard.apply(&InputEvent::Key { code, pressed });
    }

    fn mouse_move(&mut self, x: f64, y: f64) {
        self.keyboard.apply(&InputEvent::PointerMoved { x, y });
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match sector as i32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

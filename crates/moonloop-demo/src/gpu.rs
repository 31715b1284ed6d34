use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::{SurfaceError, TextureFormat};
use winit::window::Window;

/// Swapchain choices for the demo window.
#[derive(Debug, Clone)]
pub struct SurfacePrefs {
    /// Clear colours are authored in sRGB; pick an sRGB view of the swapchain
    /// when the adapter offers one.
    pub srgb: bool,

    /// FIFO keeps presentation in step with the redraws the host requests.
    pub present_mode: wgpu::PresentMode,

    pub frame_latency: u32,
}

impl Default for SurfacePrefs {
    fn default() -> Self {
        Self {
            srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            frame_latency: 2,
        }
    }
}

/// What to do with a frame whose swapchain texture could not be acquired.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Recovery {
    /// Reconfigure at the current size and drop this frame.
    Reconfigure,
    /// Drop this frame only.
    Skip,
    /// Give up; the error reaches the render loop.
    Fail,
}

fn recovery_for(err: &SurfaceError) -> Recovery {
    match err {
        SurfaceError::Lost | SurfaceError::Outdated => Recovery::Reconfigure,
        SurfaceError::OutOfMemory => Recovery::Fail,
        _ => Recovery::Skip,
    }
}

/// Swapchain texture plus the encoder recording the clear pass into it.
pub struct Frame {
    pub texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// GPU state owned by the clear renderer.
///
/// Created in `Renderer::init`; this is where a machine without a usable
/// adapter is detected.
pub struct WindowGpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl WindowGpu {
    pub async fn new(window: Arc<Window>, prefs: SurfacePrefs) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window)
            .context("window cannot host a wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        log::info!("using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("moonloop clear"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("adapter refused to open a device")?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps.formats, prefs.srgb)
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: prefs.present_mode,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: prefs.frame_latency,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain texture, or `None` when this frame should be dropped.
    pub fn acquire(&mut self) -> Result<Option<Frame>> {
        let texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => {
                return match recovery_for(&err) {
                    Recovery::Reconfigure => {
                        log::debug!("swapchain {err}; reconfiguring");
                        self.surface.configure(&self.device, &self.config);
                        Ok(None)
                    }
                    Recovery::Skip => {
                        log::debug!("swapchain {err}; dropping frame");
                        Ok(None)
                    }
                    Recovery::Fail => Err(err).context("swapchain texture unavailable"),
                };
            }
        };

        let view = texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("moonloop clear"),
            });

        Ok(Some(Frame {
            texture,
            view,
            encoder,
        }))
    }

    pub fn present(&self, frame: Frame) {
        let Frame {
            texture,
            view,
            encoder,
        } = frame;
        self.queue.submit([encoder.finish()]);
        drop(view);
        texture.present();
    }
}

fn pick_format(formats: &[TextureFormat], srgb: bool) -> Option<TextureFormat> {
    let first = formats.first().copied();
    if !srgb {
        return first;
    }
    formats.iter().copied().find(TextureFormat::is_srgb).or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_format_wins_when_asked_for() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(pick_format(&formats, true), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(pick_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn linear_only_surface_falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];
        assert_eq!(pick_format(&formats, true), Some(TextureFormat::Rgba16Float));
        assert_eq!(pick_format(&[], true), None);
    }

    #[test]
    fn lost_swapchain_is_rebuilt_and_oom_is_fatal() {
        assert_eq!(recovery_for(&SurfaceError::Lost), Recovery::Reconfigure);
        assert_eq!(recovery_for(&SurfaceError::Outdated), Recovery::Reconfigure);
        assert_eq!(recovery_for(&SurfaceError::Timeout), Recovery::Skip);
        assert_eq!(recovery_for(&SurfaceError::OutOfMemory), Recovery::Fail);
    }
}

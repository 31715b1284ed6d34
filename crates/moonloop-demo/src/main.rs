mod clear;
mod gpu;

use anyhow::{Context, Result};
use moonloop_engine::driver::LoopConfig;
use moonloop_engine::host::native::{HostConfig, NativeHost};
use moonloop_engine::logging::{init_logging, LoggingConfig};
use moonloop_engine::time::FramePacing;

use clear::ClearRenderer;
use gpu::SurfacePrefs;

/// Optional frame rate cap, e.g. `MOONLOOP_FPS_LIMIT=30`.
const FPS_LIMIT_VAR: &str = "MOONLOOP_FPS_LIMIT";

fn pacing_from_env() -> Result<FramePacing> {
    match std::env::var(FPS_LIMIT_VAR) {
        Ok(raw) => {
            let fps: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{FPS_LIMIT_VAR} must be a number, got '{raw}'"))?;
            Ok(FramePacing::fps_limit(fps)?)
        }
        Err(_) => Ok(FramePacing::Uncapped),
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = HostConfig {
        title: "moonloop demo".to_string(),
        loop_config: LoopConfig::default().with_pacing(pacing_from_env()?),
        ..Default::default()
    };

    log::info!("starting with {:?}", config.loop_config.pacing);

    NativeHost::run(config, |window| Ok(ClearRenderer::new(window, SurfacePrefs::default())))
}

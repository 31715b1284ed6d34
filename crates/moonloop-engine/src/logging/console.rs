use std::sync::Once;

/// Browser logger configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Most verbose level forwarded to the console.
    pub level: log::Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: log::Level::Info,
        }
    }
}

static INIT: Once = Once::new();

/// Routes `log` records to the browser console and panics to `console.error`.
///
/// Runs once; later calls, or a logger installed by the page first, are left alone.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();

        if console_log::init_with_level(config.level).is_err() {
            return;
        }

        log::debug!("console logging initialized");
    });
}

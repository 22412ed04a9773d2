pub const TAG: &str = "rs_camera_manipulator";

#[derive(Debug, Clone)]
pub struct LoggerConfiguration {
    pub max_level: log::LevelFilter,
}

impl Default for LoggerConfiguration {
    fn default() -> Self {
        Self {
            max_level: if cfg!(debug_assertions) {
                log::LevelFilter::Trace
            } else {
                log::LevelFilter::Warn
            },
        }
    }
}

/// Installs the platform logger. Later calls are ignored.
#[cfg(target_os = "android")]
pub fn init(cfg: LoggerConfiguration) {
    let config = android_logger::Config::default()
        .with_max_level(cfg.max_level)
        .with_tag(TAG);
    android_logger::init_once(config);
}

/// Installs the platform logger. Later calls are ignored.
#[cfg(not(target_os = "android"))]
pub fn init(cfg: LoggerConfiguration) {
    let mut builder = env_logger::Builder::new();
    builder.write_style(env_logger::WriteStyle::Auto);
    builder.filter_level(log::LevelFilter::Warn);
    builder.filter_module(TAG, cfg.max_level);
    let _ = builder.try_init();
}

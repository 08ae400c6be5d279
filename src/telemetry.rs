use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LARDER_LOG";

/// Installs the stderr subscriber. Filter comes from `LARDER_LOG`, default `warn`.
/// Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

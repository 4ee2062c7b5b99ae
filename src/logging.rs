use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `tracing` subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (e.g. by a test harness).
    let _ = fmt().with_env_filter(filter).try_init();
}

//! Log subscriber setup

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`, defaulting to
/// `info`. Calling it again is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// common/src/logging.rs
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only the flow's result line.
/// Level comes from `RUST_LOG`, `warn` when unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

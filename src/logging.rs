//! Diagnostic logging setup.
//!
//! Logs go to stderr so the stdout contracts of both tools (reports, JSON)
//! stay machine-readable. Verbosity is controlled with `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

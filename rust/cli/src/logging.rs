//! Diagnostic logging for the `hilo` binary.
//!
//! Engine `tracing` events go to stderr so they never mix with the table on
//! stdout. The filter comes from `RUST_LOG` and defaults to warnings only,
//! which keeps shoe reshuffles visible during play.

use tracing_subscriber::EnvFilter;

/// Initialize logging for the application.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

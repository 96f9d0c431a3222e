// src/logging.rs
//! Diagnostic logging setup.
//!
//! Traces go to stderr so stdout stays a clean report channel. The filter is
//! read from `GATEKEEPER_LOG` (same syntax as `RUST_LOG`), defaulting to `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GATEKEEPER_LOG";

/// Installs the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Logging initialisation.
//!
//! The filter is read from `RUST_LOG` (e.g. `RUST_LOG=workforce_engine=debug`)
//! and defaults to `info`.  Logs go to stderr so the JSON report on
//! stdout stays clean.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Verbose logging for tests.  Safe to call more than once.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

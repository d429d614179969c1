//! Tracing setup
//!
//! Events go to stderr so report output on stdout stays machine-readable.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber once
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. `"warn"` or
/// `"envelope_engine=debug"`) is used. An unparsable directive falls back to
/// `warn`.
pub fn init(default_directive: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_directive))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // another subscriber may already be installed (e.g. by a test harness)
        let installed = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!(default_directive, "Tracing initialized");
        }
    });
}

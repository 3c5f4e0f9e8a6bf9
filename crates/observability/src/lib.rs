//! Tracing/logging setup shared by binaries.
//!
//! Authorization decisions are logged as structured events (user, operation,
//! module, action), so the subscriber emits JSON for machine consumption.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing/logging.
///
/// Filtering is driven by `RUST_LOG` and defaults to `info`. Safe to call
/// multiple times; subsequent calls are no-ops.
pub fn init() {
    init_with_default_filter("info");
}

/// Initialize with an explicit fallback filter (tests, dev tools).
pub fn init_with_default_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

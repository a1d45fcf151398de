//! Shared helpers for the workspace integration tests.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a compact tracing subscriber once, honoring `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Whether two `(address, length)` ranges overlap. Zero-length ranges
/// never overlap anything.
#[must_use]
pub fn ranges_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    if a.1 == 0 || b.1 == 0 {
        return false;
    }
    a.0 < b.0 + b.1 && b.0 < a.0 + a.1
}

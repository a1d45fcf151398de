//! Atomic retention statistics for scopes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the backing buffers a scope retains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionStats {
    /// Number of backing buffers attached to the scope.
    pub buffers: u64,
    /// Total bytes across attached buffers.
    pub bytes: u64,
    /// How many of the buffers are dedicated oversized allocations.
    pub dedicated: u64,
}

/// Lock-free counters behind [`RetentionStats`].
pub(crate) struct AtomicRetentionStats {
    buffers: AtomicU64,
    bytes: AtomicU64,
    dedicated: AtomicU64,
}

impl AtomicRetentionStats {
    pub(crate) fn new() -> Self {
        Self {
            buffers: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            dedicated: AtomicU64::new(0),
        }
    }

    pub(crate) fn snapshot(&self) -> RetentionStats {
        RetentionStats {
            buffers: self.buffers.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
            dedicated: self.dedicated.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn record_buffer(&self, len: u64, dedicated: bool) {
        self.buffers.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(len, Ordering::Relaxed);
        if dedicated {
            self.dedicated.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_zeroed() {
        let stats = AtomicRetentionStats::new();
        assert_eq!(stats.snapshot(), RetentionStats::default());
    }

    #[test]
    fn record_and_snapshot() {
        let stats = AtomicRetentionStats::new();
        stats.record_buffer(4096, false);
        stats.record_buffer(4096, false);
        stats.record_buffer(65536, true);
        let snap = stats.snapshot();
        assert_eq!(snap.buffers, 3);
        assert_eq!(snap.bytes, 4096 * 2 + 65536);
        assert_eq!(snap.dedicated, 1);
    }
}

//! Scope handles: the lifetime and confinement token for backing buffers.
//!
//! A [`RegionScope`] stands in for the external lifetime object: every
//! backing buffer an arena obtains is attached to a scope, and the memory
//! is released only when the last handle to that scope drops. A scope
//! optionally records an owning thread; arenas bound to an owned scope
//! refuse allocations from any other thread.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::error::ArenaError;
use crate::raw::{BufferRef, RawBuffer};
use crate::stats::{AtomicRetentionStats, RetentionStats};

/// Cheap cloneable handle to a buffer-retaining scope.
///
/// Clones share the same retention list and owner identity. Dropping the
/// last clone frees every attached buffer at once.
#[derive(Clone)]
pub struct RegionScope {
    inner: Arc<ScopeInner>,
}

struct ScopeInner {
    owner: Option<ThreadId>,
    buffers: Mutex<Vec<RawBuffer>>,
    stats: AtomicRetentionStats,
}

impl RegionScope {
    /// Create a scope owned by the calling thread.
    ///
    /// Arenas on a confined scope reject allocation from any other thread
    /// with [`ArenaError::ConfinementViolation`].
    #[must_use]
    pub fn confined() -> Self {
        Self::with_owner(Some(thread::current().id()))
    }

    /// Create a scope with no owning thread.
    #[must_use]
    pub fn shared() -> Self {
        Self::with_owner(None)
    }

    fn with_owner(owner: Option<ThreadId>) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                owner,
                buffers: Mutex::new(Vec::new()),
                stats: AtomicRetentionStats::new(),
            }),
        }
    }

    /// Thread that owns this scope, if any.
    #[must_use]
    pub fn owner(&self) -> Option<ThreadId> {
        self.inner.owner
    }

    /// Fail unless the calling thread may allocate against this scope.
    pub(crate) fn check_confined(&self) -> Result<(), ArenaError> {
        match self.inner.owner {
            Some(owner) if owner != thread::current().id() => {
                Err(ArenaError::ConfinementViolation {
                    owner,
                    caller: thread::current().id(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Take ownership of `buffer` for the rest of the scope's life and
    /// return its base and length for carving.
    pub(crate) fn attach(&self, buffer: RawBuffer, dedicated: bool) -> BufferRef {
        let view = buffer.view();
        self.inner.stats.record_buffer(buffer.len() as u64, dedicated);
        self.inner.buffers.lock().push(buffer);
        view
    }

    /// Snapshot of what this scope currently retains.
    #[must_use]
    pub fn retention(&self) -> RetentionStats {
        self.inner.stats.snapshot()
    }
}

impl fmt::Debug for RegionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionScope")
            .field("owner", &self.inner.owner)
            .field("retention", &self.retention())
            .finish()
    }
}

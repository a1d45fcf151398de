//! Serialized shared arena: one fixed buffer, many threads.

use parking_lot::Mutex;

use crate::allocator::SliceAllocator;
use crate::error::ArenaError;
use crate::fixed::FixedArena;
use crate::raw::BufferSource;
use crate::scope::RegionScope;
use crate::slice::Slice;

/// A [`FixedArena`] whose allocations are serialized behind a mutex so
/// several threads can deliberately share one buffer.
///
/// Confinement checking is bypassed: this wrapper exists precisely for
/// cross-thread use. The lock covers the whole slice-or-fail decision, so
/// concurrent callers see the same semantics as sequential ones.
pub struct SharedFixedArena {
    inner: Mutex<FixedArena>,
}

impl SharedFixedArena {
    /// Create a shared arena over a single zeroed buffer of `capacity`
    /// bytes.
    pub fn new(scope: RegionScope, capacity: usize) -> Result<Self, ArenaError> {
        Ok(Self {
            inner: Mutex::new(FixedArena::new(scope, capacity)?),
        })
    }

    /// Create a shared arena whose single buffer comes from `source`.
    pub fn with_source<S: BufferSource + ?Sized>(
        scope: RegionScope,
        source: &S,
        capacity: usize,
    ) -> Result<Self, ArenaError> {
        Ok(Self {
            inner: Mutex::new(FixedArena::with_source(scope, source, capacity)?),
        })
    }

    /// Scope this arena allocates against.
    #[must_use]
    pub fn scope(&self) -> RegionScope {
        self.inner.lock().scope().clone()
    }

    /// Total capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Bytes not yet carved. Alignment padding counts as carved.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.inner.lock().remaining()
    }
}

impl SliceAllocator for SharedFixedArena {
    fn allocate(&self, size: usize, align: usize) -> Result<Slice<'_>, ArenaError> {
        let raw = self.inner.lock().allocate_unconfined(size, align)?;
        Ok(Slice::from_raw(raw))
    }
}

//! Per-thread shared arena: one private growing arena per calling thread.

use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::allocator::SliceAllocator;
use crate::error::ArenaError;
use crate::growing::{GrowingArena, DEFAULT_BLOCK_SIZE};
use crate::raw::{BufferSource, HeapSource};
use crate::scope::RegionScope;
use crate::slice::{RawSlice, Slice};

/// Buffer source shared by all of an instance's per-thread arenas.
type SharedSource = Arc<dyn BufferSource + Send + Sync>;

thread_local! {
    /// This thread's private growing arenas, keyed by the owning
    /// [`PerThreadArena`] instance id.
    static LOCAL_ARENAS: RefCell<HashMap<u64, GrowingArena<SharedSource>>> =
        RefCell::new(HashMap::new());
}

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(0);

/// An arena whose callers never contend: each thread lazily gets its own
/// private [`GrowingArena`], all attached to one shared scope.
///
/// The per-thread registry lives in native thread-local storage, so the
/// allocation hot path takes no lock and creation races are impossible by
/// construction. Threads differ only in bump-pointer state: every block
/// any of them acquires is retained by the shared scope, so a thread's
/// chain stays valid (and stays allocated) even if the thread exits before
/// the scope ends. The memory is released once the last scope handle —
/// including the ones held by still-registered per-thread arenas — drops.
pub struct PerThreadArena {
    scope: RegionScope,
    source: SharedSource,
    block_size: usize,
    id: u64,
}

impl PerThreadArena {
    /// Create a per-thread arena on `scope` with the default block size.
    ///
    /// No buffer is acquired until a thread first allocates.
    #[must_use]
    pub fn new(scope: RegionScope) -> Self {
        Self::with_source(scope, Arc::new(HeapSource), DEFAULT_BLOCK_SIZE)
    }

    /// Create a per-thread arena with a custom standard block size.
    #[must_use]
    pub fn with_block_size(scope: RegionScope, block_size: usize) -> Self {
        Self::with_source(scope, Arc::new(HeapSource), block_size)
    }

    /// Create a per-thread arena drawing blocks from a custom source.
    #[must_use]
    pub fn with_source(scope: RegionScope, source: SharedSource, block_size: usize) -> Self {
        Self {
            scope,
            source,
            block_size,
            id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Scope shared by every thread's private arena.
    #[must_use]
    pub fn scope(&self) -> &RegionScope {
        &self.scope
    }

    fn allocate_raw(&self, size: usize, align: usize) -> Result<RawSlice, ArenaError> {
        // Checked before lazy creation so a wrong-thread call cannot leave
        // an orphaned private arena behind.
        self.scope.check_confined()?;
        LOCAL_ARENAS.with(|map| {
            let mut map = map.borrow_mut();
            let arena = match map.entry(self.id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(slot) => slot.insert(GrowingArena::with_source(
                    self.scope.clone(),
                    Arc::clone(&self.source),
                    self.block_size,
                )?),
            };
            arena.allocate_raw(size, align)
        })
    }
}

impl SliceAllocator for PerThreadArena {
    fn allocate(&self, size: usize, align: usize) -> Result<Slice<'_>, ArenaError> {
        self.allocate_raw(size, align).map(Slice::from_raw)
    }
}

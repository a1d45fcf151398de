//! Fixed-capacity arena: one backing buffer, exhaustion is an error.

use tracing::debug;

use crate::allocator::{check_align, SliceAllocator};
use crate::bump::BumpState;
use crate::error::ArenaError;
use crate::raw::{BufferSource, HeapSource, BLOCK_ALIGN};
use crate::scope::RegionScope;
use crate::slice::{RawSlice, Slice};

/// An arena over exactly one buffer of caller-chosen size.
///
/// There is no growth path: a request the remaining space cannot hold
/// fails with [`ArenaError::CapacityExceeded`] and leaves the arena
/// untouched, so smaller requests may still succeed afterwards.
///
/// Like [`GrowingArena`](crate::GrowingArena), the arena is confined to
/// its scope's owner thread, if the scope records one.
pub struct FixedArena {
    scope: RegionScope,
    bump: BumpState,
}

impl FixedArena {
    /// Create an arena over a single zeroed buffer of `capacity` bytes.
    pub fn new(scope: RegionScope, capacity: usize) -> Result<Self, ArenaError> {
        Self::with_source(scope, &HeapSource, capacity)
    }

    /// Create an arena whose single buffer comes from `source`.
    pub fn with_source<S: BufferSource + ?Sized>(
        scope: RegionScope,
        source: &S,
        capacity: usize,
    ) -> Result<Self, ArenaError> {
        let buf = scope.attach(source.request(capacity, BLOCK_ALIGN)?, false);
        Ok(Self {
            scope,
            bump: BumpState::new(buf),
        })
    }

    /// Scope this arena allocates against.
    #[must_use]
    pub fn scope(&self) -> &RegionScope {
        &self.scope
    }

    /// Total capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bump.len()
    }

    /// Bytes not yet carved. Alignment padding counts as carved.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bump.remaining()
    }

    /// Carve without the confinement check. The serialized wrapper owns
    /// cross-thread safety itself and calls this directly.
    pub(crate) fn allocate_unconfined(
        &self,
        size: usize,
        align: usize,
    ) -> Result<RawSlice, ArenaError> {
        check_align(align);
        self.bump.try_slice(size, align).ok_or_else(|| {
            debug!(
                "fixed arena exhausted: requested {size} bytes, {} of {} free",
                self.bump.remaining(),
                self.bump.len()
            );
            ArenaError::CapacityExceeded {
                requested: size,
                remaining: self.bump.remaining(),
                capacity: self.bump.len(),
            }
        })
    }

    pub(crate) fn allocate_raw(&self, size: usize, align: usize) -> Result<RawSlice, ArenaError> {
        self.scope.check_confined()?;
        self.allocate_unconfined(size, align)
    }
}

impl SliceAllocator for FixedArena {
    fn allocate(&self, size: usize, align: usize) -> Result<Slice<'_>, ArenaError> {
        self.allocate_raw(size, align).map(Slice::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn forty_requests_fit_then_the_next_fails() {
        let arena = FixedArena::new(RegionScope::confined(), 4096).unwrap();
        for _ in 0..40 {
            // 100 is a multiple of 4, so no padding accrues.
            arena.allocate(100, 4).unwrap();
        }
        assert_eq!(arena.remaining(), 96);

        let err = arena.allocate(100, 4).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExceeded {
                requested: 100,
                remaining: 96,
                capacity: 4096,
            }
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn failure_leaves_state_untouched() {
        let arena = FixedArena::new(RegionScope::confined(), 128).unwrap();
        arena.allocate(100, 1).unwrap();
        let before = arena.remaining();

        assert!(arena.allocate(64, 1).is_err());
        assert_eq!(arena.remaining(), before);

        // The space that was left is still usable.
        arena.allocate(before, 1).unwrap();
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn slices_are_disjoint_and_aligned() {
        let arena = FixedArena::new(RegionScope::confined(), 1024).unwrap();
        let a = arena.allocate(100, 8).unwrap();
        let b = arena.allocate(100, 8).unwrap();
        assert_eq!(a.address() % 8, 0);
        assert_eq!(b.address() % 8, 0);
        assert!(a.address() + a.len() <= b.address());
    }

    #[test]
    fn zero_capacity_still_serves_empty_requests() {
        let arena = FixedArena::new(RegionScope::confined(), 0).unwrap();
        assert!(arena.allocate(0, 1).unwrap().is_empty());
        assert!(arena.allocate(1, 1).is_err());
    }

    #[test]
    fn never_grows_past_its_buffer() {
        let arena = FixedArena::new(RegionScope::confined(), 256).unwrap();
        arena.allocate(256, 1).unwrap();
        assert!(arena.allocate(1, 1).is_err());
        assert_eq!(arena.scope().retention().buffers, 1);
    }

    #[test]
    fn confined_arena_rejects_other_threads() {
        let arena = FixedArena::new(RegionScope::confined(), 128).unwrap();
        let err = thread::spawn(move || arena.allocate(8, 8).map(|_| ()))
            .join()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, ArenaError::ConfinementViolation { .. }));
    }
}

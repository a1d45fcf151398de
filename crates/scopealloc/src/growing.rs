//! Growing arena: bump allocation over a chain of standard-size blocks.

use tracing::{debug, trace};

use crate::allocator::{check_align, SliceAllocator};
use crate::bump::BumpState;
use crate::error::ArenaError;
use crate::raw::{BufferSource, HeapSource, BLOCK_ALIGN};
use crate::scope::RegionScope;
use crate::slice::{RawSlice, Slice};

/// Default size of a standard block, in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// An arena that grows by whole blocks and never refuses a request while
/// the buffer source keeps supplying memory.
///
/// Small requests are carved from the current block. When the block runs
/// out, a fresh one replaces it and the tail of the old block is abandoned
/// (the scope still retains the memory, so outstanding slices stay valid).
/// A request whose worst case (`size + align - 1`) exceeds the block size
/// gets a dedicated buffer of exactly the needed size; the current block
/// keeps filling afterwards.
///
/// The arena is confined: if its scope records an owner thread, every
/// allocation from another thread fails with
/// [`ArenaError::ConfinementViolation`].
pub struct GrowingArena<S: BufferSource = HeapSource> {
    scope: RegionScope,
    source: S,
    block_size: usize,
    bump: BumpState,
}

impl GrowingArena<HeapSource> {
    /// Create an arena on `scope` with the default block size.
    ///
    /// The first block is acquired eagerly, so construction can fail with
    /// a source error.
    pub fn new(scope: RegionScope) -> Result<Self, ArenaError> {
        Self::with_block_size(scope, DEFAULT_BLOCK_SIZE)
    }

    /// Create an arena with a custom standard block size.
    pub fn with_block_size(scope: RegionScope, block_size: usize) -> Result<Self, ArenaError> {
        Self::with_source(scope, HeapSource, block_size)
    }
}

impl<S: BufferSource> GrowingArena<S> {
    /// Create an arena drawing blocks from a custom source.
    pub fn with_source(
        scope: RegionScope,
        source: S,
        block_size: usize,
    ) -> Result<Self, ArenaError> {
        assert!(block_size > 0, "block size must be non-zero");
        let first = scope.attach(source.request(block_size, BLOCK_ALIGN)?, false);
        Ok(Self {
            scope,
            source,
            block_size,
            bump: BumpState::new(first),
        })
    }

    /// Scope this arena allocates against.
    #[must_use]
    pub fn scope(&self) -> &RegionScope {
        &self.scope
    }

    /// Standard block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub(crate) fn allocate_raw(&self, size: usize, align: usize) -> Result<RawSlice, ArenaError> {
        check_align(align);
        self.scope.check_confined()?;

        if let Some(slice) = self.bump.try_slice(size, align) {
            return Ok(slice);
        }

        // Worst case once the start address is aligned up.
        let worst = size.saturating_add(align - 1);
        if worst > self.block_size {
            // Oversized: dedicated exact-size buffer, used once and not
            // made current, so the block keeps filling afterwards.
            trace!("dedicated buffer for oversized request of {size} bytes (align {align})");
            let buf = self.scope.attach(self.source.request(size, align)?, true);
            let one_shot = BumpState::new(buf);
            return Ok(one_shot
                .try_slice(size, align)
                .expect("dedicated buffer is aligned and exactly sized"));
        }

        debug!("block exhausted, starting a fresh {} byte block", self.block_size);
        let next = self
            .scope
            .attach(self.source.request(self.block_size, BLOCK_ALIGN)?, false);
        self.bump.switch_to(next);
        Ok(self
            .bump
            .try_slice(size, align)
            .expect("size + align - 1 <= block_size, so a fresh block always fits"))
    }
}

impl<S: BufferSource> SliceAllocator for GrowingArena<S> {
    fn allocate(&self, size: usize, align: usize) -> Result<Slice<'_>, ArenaError> {
        self.allocate_raw(size, align).map(Slice::from_raw)
    }
}

//! The capability interface shared by every arena variant.

use crate::error::ArenaError;
use crate::slice::Slice;

/// Common allocation surface: carve an aligned byte range from an arena.
///
/// All four arena variants implement this trait, so callers can hold an
/// `Arc<dyn SliceAllocator>` and stay oblivious to the growth and sharing
/// strategy behind it.
pub trait SliceAllocator {
    /// Carve `size` bytes whose start address is a multiple of `align`.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two (a malformed request, as
    /// opposed to a request the arena cannot satisfy).
    ///
    /// # Errors
    ///
    /// [`ArenaError::ConfinementViolation`] from a confined arena on the
    /// wrong thread, [`ArenaError::CapacityExceeded`] from a bounded arena
    /// out of space, and [`ArenaError::Source`] when the backing buffer
    /// source fails.
    fn allocate(&self, size: usize, align: usize) -> Result<Slice<'_>, ArenaError>;

    /// Carve space for `bytes` at `align` and copy them in.
    fn allocate_bytes(&self, bytes: &[u8], align: usize) -> Result<Slice<'_>, ArenaError> {
        let mut slice = self.allocate(bytes.len(), align)?;
        slice.copy_from_slice(bytes);
        Ok(slice)
    }
}

/// Reject malformed alignment requests before touching arena state.
pub(crate) fn check_align(align: usize) {
    assert!(
        align.is_power_of_two(),
        "alignment must be a power of two, got {align}"
    );
}

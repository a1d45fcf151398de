//! Arena error taxonomy.
//!
//! Two of the three failure classes are unrecoverable: confinement
//! violations are programmer errors and buffer-source failures are
//! environmental. Capacity exhaustion on a bounded arena is the ordinary
//! outcome callers are expected to handle.

use std::thread::ThreadId;

/// Errors surfaced by [`SliceAllocator::allocate`](crate::SliceAllocator::allocate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// Allocation attempted from a thread other than the scope's owner.
    #[error("allocation from {caller:?} outside owner thread {owner:?}")]
    ConfinementViolation {
        /// Thread recorded as the scope owner.
        owner: ThreadId,
        /// Thread that attempted the allocation.
        caller: ThreadId,
    },

    /// A bounded arena cannot satisfy the request.
    #[error("capacity exceeded: requested {requested} bytes, {remaining} of {capacity} free")]
    CapacityExceeded {
        /// Bytes requested, excluding alignment padding.
        requested: usize,
        /// Bytes left in the backing buffer before this request.
        remaining: usize,
        /// Total capacity of the backing buffer.
        capacity: usize,
    },

    /// The backing buffer source could not supply a buffer.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl ArenaError {
    /// Whether a caller can meaningfully continue after this error.
    ///
    /// Only [`ArenaError::CapacityExceeded`] is an expected outcome; the
    /// other variants indicate misuse or an exhausted environment.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}

/// Failure to obtain a backing buffer from a [`BufferSource`](crate::BufferSource).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The environment could not supply `size` bytes at `align`.
    #[error("cannot supply backing buffer of {size} bytes (alignment {align})")]
    OutOfMemory {
        /// Requested buffer size in bytes.
        size: usize,
        /// Requested address alignment in bytes.
        align: usize,
    },
}

//! # scopealloc
//!
//! Scoped bump-region allocators for fast, short-lived native allocations.
//!
//! Arenas carve disjoint, aligned byte ranges ("slices") out of larger
//! backing buffers by advancing a bump pointer. No slice is ever freed on
//! its own: every backing buffer is retained by the [`RegionScope`] it was
//! requested against, and the memory is released in one step when the last
//! handle to that scope drops.
//!
//! Four arena variants cover the usual sharing patterns:
//!
//! - [`GrowingArena`] — chains standard-size blocks and never refuses a
//!   request while the buffer source keeps supplying memory; confined to
//!   the scope's owner thread.
//! - [`FixedArena`] — exactly one caller-sized buffer; exhaustion is an
//!   ordinary, recoverable error.
//! - [`SharedFixedArena`] — a [`FixedArena`] behind a mutex, for deliberate
//!   cross-thread sharing of a single buffer.
//! - [`PerThreadArena`] — one private [`GrowingArena`] per calling thread,
//!   created lazily; the allocation hot path takes no lock.
//!
//! # Example
//!
//! ```
//! use scopealloc::{FixedArena, RegionScope, SliceAllocator};
//!
//! let scope = RegionScope::confined();
//! let arena = FixedArena::new(scope, 1024).unwrap();
//!
//! let mut slice = arena.allocate(64, 8).unwrap();
//! assert_eq!(slice.address() % 8, 0);
//! assert!(slice.as_slice().iter().all(|&b| b == 0));
//!
//! slice.fill(0xAB);
//! assert_eq!(slice.as_slice()[63], 0xAB);
//! ```
//!
//! # Unsafe policy
//!
//! This crate owns the raw-memory layer, so it is one place where bounded
//! `unsafe` lives: aligned allocation and release of backing buffers,
//! materializing carved ranges as byte slices, and the send/sync
//! assertions those two imply. Each block carries a SAFETY comment; the
//! rest of the crate is kept `unsafe`-free by the workspace lint table.
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

mod allocator;
mod bump;
pub mod error;
pub mod fixed;
pub mod growing;
pub mod raw;
pub mod scope;
pub mod shared;
pub mod slice;
pub mod stats;
pub mod thread_local;

// Re-exports for the primary API surface.
pub use allocator::SliceAllocator;
pub use error::{ArenaError, SourceError};
pub use fixed::FixedArena;
pub use growing::{GrowingArena, DEFAULT_BLOCK_SIZE};
pub use raw::{BufferSource, HeapSource, RawBuffer};
pub use scope::RegionScope;
pub use shared::SharedFixedArena;
pub use slice::Slice;
pub use stats::RetentionStats;
pub use thread_local::PerThreadArena;

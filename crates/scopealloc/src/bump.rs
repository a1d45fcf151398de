//! Bump-pointer core shared by every arena variant.
//!
//! Holds the current backing buffer and the next-free offset. Carving is
//! O(1): align the first free address up, fail if the remainder cannot
//! hold the request, otherwise advance the offset. Failure never mutates
//! state — the variants decide whether exhaustion means growth or an
//! error.

use std::cell::Cell;
use std::ptr::NonNull;

use crate::raw::BufferRef;
use crate::slice::RawSlice;

pub(crate) struct BumpState {
    base: Cell<NonNull<u8>>,
    len: Cell<usize>,
    offset: Cell<usize>,
}

impl BumpState {
    pub(crate) fn new(buf: BufferRef) -> Self {
        Self {
            base: Cell::new(buf.base),
            len: Cell::new(buf.len),
            offset: Cell::new(0),
        }
    }

    /// Carve `size` bytes at `align` from the current buffer, or `None`
    /// if the remainder cannot hold them. Arithmetic overflow counts as
    /// "does not fit".
    pub(crate) fn try_slice(&self, size: usize, align: usize) -> Option<RawSlice> {
        let base = self.base.get().as_ptr() as usize;
        let free = base.checked_add(self.offset.get())?;
        let start = align_up(free, align)?;
        let end = start.checked_add(size)?;
        if end > base + self.len.get() {
            return None;
        }
        self.offset.set(end - base);
        let ptr = self.base.get().as_ptr().wrapping_add(start - base);
        NonNull::new(ptr).map(|ptr| RawSlice { ptr, len: size })
    }

    /// Abandon the current buffer and start bumping in `buf` from zero.
    pub(crate) fn switch_to(&self, buf: BufferRef) {
        self.base.set(buf.base);
        self.len.set(buf.len);
        self.offset.set(0);
    }

    /// Length of the current buffer in bytes.
    pub(crate) fn len(&self) -> usize {
        self.len.get()
    }

    /// Bytes left past the bump offset, before alignment padding.
    pub(crate) fn remaining(&self) -> usize {
        self.len.get() - self.offset.get()
    }
}

// SAFETY: the base pointer targets an allocation retained by the scope;
// a BumpState may move between threads together with its arena, and the
// Cell fields already keep it from being shared between threads.
#[allow(unsafe_code)]
unsafe impl Send for BumpState {}

fn align_up(addr: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two());
    let mask = align - 1;
    addr.checked_add(mask).map(|a| a & !mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawBuffer;

    fn state_over(buf: &RawBuffer) -> BumpState {
        BumpState::new(buf.view())
    }

    #[test]
    fn sequential_carves_are_disjoint_and_advance() {
        let buf = RawBuffer::alloc_zeroed(1024, 16).unwrap();
        let state = state_over(&buf);

        let a = state.try_slice(100, 1).unwrap();
        let b = state.try_slice(200, 1).unwrap();
        assert_eq!(a.ptr.as_ptr() as usize + 100, b.ptr.as_ptr() as usize);
        assert_eq!(state.remaining(), 1024 - 300);
    }

    #[test]
    fn carve_honors_alignment() {
        let buf = RawBuffer::alloc_zeroed(1024, 16).unwrap();
        let state = state_over(&buf);

        state.try_slice(3, 1).unwrap();
        let aligned = state.try_slice(64, 64).unwrap();
        assert_eq!(aligned.ptr.as_ptr() as usize % 64, 0);
    }

    #[test]
    fn exhaustion_fails_without_mutation() {
        let buf = RawBuffer::alloc_zeroed(128, 16).unwrap();
        let state = state_over(&buf);

        state.try_slice(100, 1).unwrap();
        let before = state.remaining();
        assert!(state.try_slice(64, 1).is_none());
        assert_eq!(state.remaining(), before);
        // A request that still fits keeps working.
        assert!(state.try_slice(before, 1).is_some());
    }

    #[test]
    fn exact_fill_consumes_everything() {
        let buf = RawBuffer::alloc_zeroed(128, 16).unwrap();
        let state = state_over(&buf);
        assert!(state.try_slice(128, 1).is_some());
        assert_eq!(state.remaining(), 0);
        assert!(state.try_slice(1, 1).is_none());
    }

    #[test]
    fn zero_size_carve_consumes_nothing() {
        let buf = RawBuffer::alloc_zeroed(64, 16).unwrap();
        let state = state_over(&buf);
        let empty = state.try_slice(0, 8).unwrap();
        assert_eq!(empty.len, 0);
        assert_eq!(state.remaining(), 64);
    }

    #[test]
    fn alignment_padding_counts_against_capacity() {
        let buf = RawBuffer::alloc_zeroed(64, 16).unwrap();
        let state = state_over(&buf);
        state.try_slice(1, 1).unwrap();
        // Aligning up to 64 skips to the end of the buffer.
        assert!(state.try_slice(1, 64).is_none());
    }

    #[test]
    fn switch_to_resets_offset() {
        let first = RawBuffer::alloc_zeroed(64, 16).unwrap();
        let second = RawBuffer::alloc_zeroed(64, 16).unwrap();
        let state = state_over(&first);
        state.try_slice(64, 1).unwrap();
        assert_eq!(state.remaining(), 0);

        state.switch_to(second.view());
        assert_eq!(state.remaining(), 64);
        let carved = state.try_slice(8, 1).unwrap();
        assert_eq!(carved.ptr.as_ptr() as usize, second.view().base.as_ptr() as usize);
    }
}

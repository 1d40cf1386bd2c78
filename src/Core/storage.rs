// Backing storage shared by a producer and a consumer.
// Access is coordinated entirely by the cursors of the ring that sits next to it.

use std::cell::UnsafeCell;

use crate::SPSC::Buffer::RingBuffer;
use crate::SPSC::Structs::IndexRange;

/// A fixed array of slots that one producer writes and one consumer reads.
///
/// The storage itself performs no synchronization. It is sound only because
/// the slices handed out are always disjoint: the producer only touches ranges
/// reported by `RingBuffer::write_ranges`, the consumer only ranges reported
/// by `RingBuffer::read_ranges`, and the cursor handshake orders the accesses.
pub(crate) struct SlotStorage<T> {
    slots: Box<[UnsafeCell<T>]>,
}

// The producer and consumer live on different threads and each hands out
// exclusive views of disjoint slots.
unsafe impl<T: Send> Sync for SlotStorage<T> {}

impl<T: Copy + Default> SlotStorage<T> {
    pub(crate) fn new(len: usize) -> Self {
        let slots = (0..len).map(|_| UnsafeCell::new(T::default())).collect();
        Self { slots }
    }
}

impl<T> SlotStorage<T> {
    #[inline]
    fn base(&self) -> *mut T {
        // UnsafeCell<T> has the same layout as T.
        self.slots.as_ptr() as *mut T
    }

    /// Shared view of the slots in `range`.
    ///
    /// # Safety
    /// No mutable view of any slot in `range` may exist for the returned lifetime.
    #[inline]
    pub(crate) unsafe fn slice(&self, range: IndexRange) -> &[T] {
        let r = range.as_range();
        debug_assert!(r.end <= self.slots.len());
        // SAFETY: bounds checked above in debug builds, aliasing guaranteed by the caller.
        unsafe { std::slice::from_raw_parts(self.base().add(r.start), r.len()) }
    }

    /// Exclusive view of the slots in `range`.
    ///
    /// # Safety
    /// No other view of any slot in `range` may exist for the returned lifetime.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn slice_mut(&self, range: IndexRange) -> &mut [T] {
        let r = range.as_range();
        debug_assert!(r.end <= self.slots.len());
        // SAFETY: bounds checked above in debug builds, aliasing guaranteed by the caller.
        unsafe { std::slice::from_raw_parts_mut(self.base().add(r.start), r.len()) }
    }
}

/// A ring together with the storage it indexes.
pub(crate) struct SharedRing<T> {
    pub(crate) ring: RingBuffer,
    pub(crate) storage: SlotStorage<T>,
}

impl<T: Copy + Default> SharedRing<T> {
    pub(crate) fn new(ring: RingBuffer) -> Self {
        let storage = SlotStorage::new(ring.capacity());
        Self { ring, storage }
    }
}

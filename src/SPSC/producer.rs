// In src/SPSC/producer.rs
use std::fmt;
use std::sync::Arc;

use crate::Core::storage::SharedRing;
use crate::SPSC::Structs::{ContiguousSlot, IndexRange, RangePair};

/// The writing end of a channel.
///
/// There is exactly one `Producer` per ring. It is `Send` but not `Clone`, and
/// every method that touches storage takes `&mut self`, so the write cursor
/// always has a single owner.
pub struct Producer<T> {
    shared: Arc<SharedRing<T>>,
}

impl<T> Producer<T> {
    pub(crate) fn new(shared: Arc<SharedRing<T>>) -> Self {
        Self { shared }
    }

    /// Slots currently free for writing, in fill order.
    pub fn write_ranges(&self) -> RangePair {
        self.shared.ring.write_ranges()
    }

    /// Number of elements that can be written right now.
    pub fn free(&self) -> usize {
        self.shared.ring.free()
    }

    pub fn capacity(&self) -> usize {
        self.shared.ring.capacity()
    }

    /// Hand the free ranges to `fill` as two mutable slices and commit what it reports.
    ///
    /// `fill` receives the first and second free range (the first one is empty
    /// unless the free space wraps) and returns how many elements it wrote,
    /// counted from the start of the first slice.
    ///
    /// # Panics
    /// Panics if `fill` reports more elements than the slices hold.
    pub fn write_with<F>(&mut self, fill: F) -> usize
    where
        F: FnOnce(&mut [T], &mut [T]) -> usize,
    {
        let ranges = self.shared.ring.write_ranges();
        let available = ranges.total_len();
        // SAFETY: free ranges are disjoint from anything the consumer may read,
        // and `&mut self` rules out a second view from this side.
        let (head, tail) = unsafe {
            (
                self.shared.storage.slice_mut(ranges.first()),
                self.shared.storage.slice_mut(ranges.second()),
            )
        };
        let written = fill(head, tail);
        assert!(
            written <= available,
            "wrote {written} elements into {available} free slots"
        );
        self.shared.ring.commit_write(written);
        written
    }

    /// Write one contiguous block of `n` elements without splitting it at the wrap.
    ///
    /// When the block does not fit before the end of the storage, the tail
    /// slots are skipped and the block is placed at index 0; the skipped slots
    /// are committed too and are reported in `ContiguousSlot::consumed`.
    /// Returns `None`, committing nothing, when no contiguous room exists.
    pub fn write_contiguous<F>(&mut self, n: usize, fill: F) -> Option<ContiguousSlot>
    where
        F: FnOnce(&mut [T]),
    {
        let slot = self.shared.ring.write_ranges().contiguous(n)?;
        let block = IndexRange::new(slot.start, slot.start + n - 1);
        // SAFETY: the block lies inside one of the free ranges just reported.
        fill(unsafe { self.shared.storage.slice_mut(block) });
        self.shared.ring.commit_write(slot.consumed);
        Some(slot)
    }
}

impl<T: Copy> Producer<T> {
    /// Copy as many elements of `items` as fit, returning how many were written.
    pub fn push_slice(&mut self, items: &[T]) -> usize {
        self.write_with(|head, tail| {
            let n_head = head.len().min(items.len());
            head[..n_head].copy_from_slice(&items[..n_head]);
            let rest = &items[n_head..];
            let n_tail = tail.len().min(rest.len());
            tail[..n_tail].copy_from_slice(&rest[..n_tail]);
            n_head + n_tail
        })
    }

    /// Write a single element, handing it back if the ring is full.
    pub fn push(&mut self, item: T) -> Result<(), T> {
        if self.push_slice(std::slice::from_ref(&item)) == 1 {
            Ok(())
        } else {
            Err(item)
        }
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_channel_end("Producer", &self.shared.ring, f)
    }
}

// src/SPSC/consumer.rs

use std::fmt;
use std::sync::Arc;

use crate::Core::storage::SharedRing;
use crate::SPSC::Structs::{IndexRange, RangePair};

/// The reading end of a channel.
///
/// Like [`Producer`](super::Producer), it is the only owner of its cursor:
/// `Send`, not `Clone`, and mutating through `&mut self`.
pub struct Consumer<T> {
    shared: Arc<SharedRing<T>>,
}

impl<T> Consumer<T> {
    pub(crate) fn new(shared: Arc<SharedRing<T>>) -> Self {
        Self { shared }
    }

    /// Slots holding committed elements, in the order they were written.
    pub fn read_ranges(&self) -> RangePair {
        self.shared.ring.read_ranges()
    }

    /// Number of committed, unread elements.
    pub fn len(&self) -> usize {
        self.shared.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.ring.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.shared.ring.capacity()
    }

    /// Hand the filled ranges to `consume` and release as many elements as it reports.
    ///
    /// # Panics
    /// Panics if `consume` reports more elements than the slices hold.
    pub fn read_with<F>(&mut self, consume: F) -> usize
    where
        F: FnOnce(&[T], &[T]) -> usize,
    {
        let ranges = self.shared.ring.read_ranges();
        let available = ranges.total_len();
        // SAFETY: filled ranges were published by the producer with a release
        // store and are not written again until this side commits them.
        let (head, tail) = unsafe {
            (
                self.shared.storage.slice(ranges.first()),
                self.shared.storage.slice(ranges.second()),
            )
        };
        let consumed = consume(head, tail);
        assert!(
            consumed <= available,
            "consumed {consumed} elements out of {available} available"
        );
        self.shared.ring.commit_read(consumed);
        consumed
    }

    /// Release the `n` oldest elements without looking at them.
    ///
    /// # Panics
    /// Panics if fewer than `n` elements are available.
    pub fn skip(&mut self, n: usize) {
        let available = self.len();
        assert!(n <= available, "skipping {n} elements out of {available} available");
        self.shared.ring.commit_read(n);
    }
}

impl<T: Copy> Consumer<T> {
    /// The `offset`-th unread element, counted from the read cursor.
    pub fn get(&self, offset: usize) -> Option<T> {
        let ranges = self.shared.ring.read_ranges();
        let (head, tail) = (ranges.first(), ranges.second());
        let index = if offset < head.len() {
            head.start + offset
        } else if offset - head.len() < tail.len() {
            tail.start + (offset - head.len())
        } else {
            return None;
        };
        // SAFETY: `index` lies in a filled range, read-only view.
        let slot = unsafe { self.shared.storage.slice(IndexRange::new(index, index)) };
        slot.first().copied()
    }

    /// Copy the `n` oldest elements into `out` without releasing them.
    ///
    /// Returns how many were copied, which is less than `n` if fewer are available.
    pub fn peek_into(&self, n: usize, out: &mut Vec<T>) -> usize {
        let ranges = self.shared.ring.read_ranges();
        let mut copied = 0;
        for range in ranges.iter() {
            if copied == n {
                break;
            }
            // SAFETY: filled range, read-only view.
            let slice = unsafe { self.shared.storage.slice(range) };
            let take = slice.len().min(n - copied);
            out.extend_from_slice(&slice[..take]);
            copied += take;
        }
        copied
    }

    /// Move up to `out.len()` elements into `out`, returning how many were read.
    pub fn pop_slice(&mut self, out: &mut [T]) -> usize {
        self.read_with(|head, tail| {
            let n_head = head.len().min(out.len());
            out[..n_head].copy_from_slice(&head[..n_head]);
            let rest = &mut out[n_head..];
            let n_tail = tail.len().min(rest.len());
            rest[..n_tail].copy_from_slice(&tail[..n_tail]);
            n_head + n_tail
        })
    }

    /// Read a single element.
    pub fn pop(&mut self) -> Option<T> {
        let item = self.get(0)?;
        self.shared.ring.commit_read(1);
        Some(item)
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_channel_end("Consumer", &self.shared.ring, f)
    }
}

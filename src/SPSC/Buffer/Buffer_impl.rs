use std::fmt;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

use super::layout::Cursors;
use super::Buffer::{RingBuffer, WideIndex};
use crate::error::ConfigError;
use crate::SPSC::Structs::{IndexRange, RangePair};

impl RingBuffer {
    /// Create an empty ring tracking `capacity` slots of caller-owned storage.
    ///
    /// # Errors
    /// * `ConfigError::CapacityTooSmall` if `capacity < 2`.
    /// * `ConfigError::CapacityTooLarge` if `2 * capacity` does not fit in [`WideIndex`].
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity < 2 {
            log::debug!("rejecting ring capacity {capacity}: below minimum");
            return Err(ConfigError::CapacityTooSmall { capacity });
        }
        match WideIndex::try_from(capacity) {
            Ok(wide) if wide <= WideIndex::MAX / 2 => {}
            _ => {
                log::debug!("rejecting ring capacity {capacity}: cursor sum would overflow");
                return Err(ConfigError::CapacityTooLarge { capacity });
            }
        }

        Ok(Self {
            cursors: Cursors::new(),
            capacity,
        })
    }

    /// Number of slots tracked, including the one that is always kept free.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest number of elements the ring can hold at once.
    #[inline]
    pub fn usable_capacity(&self) -> usize {
        self.capacity - 1
    }

    #[inline]
    fn positions(&self) -> (usize, usize) {
        (
            self.cursors.read.load(Acquire),
            self.cursors.write.load(Acquire),
        )
    }

    /// Ranges that are free to be written, in the order they must be filled.
    ///
    /// The slot just behind `read` is never reported. When `read` is 0 or 1 that
    /// slot sits at the high end of the index space, which is why those two
    /// cases are handled apart from the general one.
    pub fn write_ranges(&self) -> RangePair {
        let (rd, wr) = self.positions();
        let cap = self.capacity;

        match rd {
            0 => {
                if wr == cap - 1 {
                    RangePair::EMPTY
                } else {
                    RangePair::single(wr, cap - 2)
                }
            }
            1 => {
                if wr == 0 {
                    RangePair::EMPTY
                } else {
                    RangePair::single(wr, cap - 1)
                }
            }
            _ => {
                if wr < rd - 1 {
                    RangePair::single(wr, rd - 2)
                } else if wr == rd - 1 {
                    RangePair::EMPTY
                } else if wr == rd {
                    RangePair::wrapped(IndexRange::new(wr, cap - 1), IndexRange::new(0, wr - 2))
                } else {
                    RangePair::wrapped(IndexRange::new(wr, cap - 1), IndexRange::new(0, rd - 2))
                }
            }
        }
    }

    /// Ranges holding committed, unread elements, in the order they were written.
    pub fn read_ranges(&self) -> RangePair {
        let (rd, wr) = self.positions();
        let cap = self.capacity;

        if rd == wr {
            RangePair::EMPTY
        } else if rd < wr {
            RangePair::single(rd, wr - 1)
        } else if wr == 0 {
            RangePair::single(rd, cap - 1)
        } else {
            RangePair::wrapped(IndexRange::new(rd, cap - 1), IndexRange::new(0, wr - 1))
        }
    }

    /// Publish `n` newly written elements to the consumer.
    ///
    /// Must only be called by the single producer, after the elements have been
    /// written, and `n` must not exceed the last `write_ranges().total_len()`.
    pub fn commit_write(&self, n: usize) {
        debug_assert!(
            n <= self.write_ranges().total_len(),
            "commit_write({n}) exceeds free space {}",
            self.write_ranges().total_len()
        );
        self.advance(&self.cursors.write, n);
    }

    /// Release `n` consumed elements back to the producer.
    ///
    /// Must only be called by the single consumer, and `n` must not exceed the
    /// last `read_ranges().total_len()`.
    pub fn commit_read(&self, n: usize) {
        debug_assert!(
            n <= self.read_ranges().total_len(),
            "commit_read({n}) exceeds filled space {}",
            self.read_ranges().total_len()
        );
        self.advance(&self.cursors.read, n);
    }

    #[inline]
    fn advance(&self, cursor: &AtomicUsize, n: usize) {
        // Only the owning side stores this cursor, so a relaxed load sees its own last store.
        let cap = self.capacity as WideIndex;
        let pos = (cursor.load(Relaxed) as WideIndex + n as WideIndex) % cap;
        cursor.store(pos as usize, Release);
    }

    /// Number of committed, unread elements.
    pub fn len(&self) -> usize {
        self.read_ranges().total_len()
    }

    /// Number of slots the producer may currently fill.
    pub fn free(&self) -> usize {
        self.write_ranges().total_len()
    }

    pub fn is_empty(&self) -> bool {
        let (rd, wr) = self.positions();
        rd == wr
    }

    pub fn is_full(&self) -> bool {
        self.free() == 0
    }

    /// Current `(read, write)` cursor positions, for diagnostics.
    pub fn cursor_positions(&self) -> (usize, usize) {
        self.positions()
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_ring_buffer(self, f)
    }
}

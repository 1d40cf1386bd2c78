// Index ranges reported by the ring. They describe positions only, never data.

use std::ops::Range;

/// An inclusive index range `[start, end]`.
///
/// The empty range is encoded as `start = 1, end = 0`, which no non-empty range
/// can produce.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    pub const EMPTY: IndexRange = IndexRange { start: 1, end: 0 };

    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of indices covered: `end - start + 1`, or 0 for the sentinel.
    #[inline]
    pub const fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The same indices as a half-open range, suitable for slicing.
    #[inline]
    pub fn as_range(&self) -> Range<usize> {
        if self.is_empty() {
            0..0
        } else {
            self.start..self.end + 1
        }
    }
}

impl Default for IndexRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Exactly two index ranges describing free or filled space around the wrap point.
///
/// Range 0 is only populated when the region wraps; it always precedes range 1
/// in element order, so callers must visit range 0 first.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RangePair {
    pub ranges: [IndexRange; 2],
}

/// Where a contiguous block of `n` elements can be placed, see [`RangePair::contiguous`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContiguousSlot {
    /// First index of the block.
    pub start: usize,
    /// Number of slots to commit, including any tail skipped before the wrap.
    pub consumed: usize,
}

impl RangePair {
    pub const EMPTY: RangePair = RangePair {
        ranges: [IndexRange::EMPTY, IndexRange::EMPTY],
    };

    /// A pair holding a single range (stored in slot 1).
    #[inline]
    pub const fn single(start: usize, end: usize) -> Self {
        Self {
            ranges: [IndexRange::EMPTY, IndexRange::new(start, end)],
        }
    }

    /// A wrapped pair: `head` first, then `tail` starting at index 0.
    #[inline]
    pub const fn wrapped(head: IndexRange, tail: IndexRange) -> Self {
        Self {
            ranges: [head, tail],
        }
    }

    #[inline]
    pub const fn first(&self) -> IndexRange {
        self.ranges[0]
    }

    #[inline]
    pub const fn second(&self) -> IndexRange {
        self.ranges[1]
    }

    /// Combined number of indices in both ranges.
    #[inline]
    pub const fn total_len(&self) -> usize {
        self.ranges[0].len() + self.ranges[1].len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Both ranges, in element order.
    pub fn iter(&self) -> impl Iterator<Item = IndexRange> + '_ {
        self.ranges.iter().copied()
    }

    /// Every index covered, in element order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().flat_map(|r| r.as_range())
    }

    /// Finds room for `n` contiguous elements without splitting them across the wrap.
    ///
    /// Range 0 is preferred. If only range 1 is large enough, the whole of range
    /// 0 is given up and counted in `consumed`, so committing `consumed` moves
    /// the cursor past the block.
    pub fn contiguous(&self, n: usize) -> Option<ContiguousSlot> {
        if n == 0 {
            return None;
        }
        let (head, tail) = (self.first(), self.second());
        if head.len() >= n {
            Some(ContiguousSlot {
                start: head.start,
                consumed: n,
            })
        } else if tail.len() >= n {
            Some(ContiguousSlot {
                start: tail.start,
                consumed: head.len() + n,
            })
        } else {
            None
        }
    }
}

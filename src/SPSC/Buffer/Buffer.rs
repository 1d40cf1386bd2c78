// This is the index-only ring shared by one producer and one consumer

use super::layout::Cursors;

/// Integer type used for overflow-free cursor addition.
///
/// It must hold `2 * capacity`; `RingBuffer::new` rejects capacities for which
/// that does not hold.
pub type WideIndex = u64;

/// A lock-free, single-producer/single-consumer range-tracking ring buffer.
///
/// The ring owns no elements. It tracks two cursors over `capacity` slots of
/// caller-owned storage and reports, as at most two inclusive index ranges,
/// where new elements may be written and where committed elements wait to be
/// read.
///
/// ### Concurrency Design:
/// - **Producer**: queries `write_ranges`, writes into those slots, then
///   publishes with `commit_write` (release store of `write`).
/// - **Consumer**: queries `read_ranges` (acquire load of `write`), reads those
///   slots, then frees them with `commit_read` (release store of `read`).
///
/// `read == write` means empty and `write == read - 1 (mod capacity)` means
/// full, so only `capacity - 1` slots are ever usable.
pub struct RingBuffer {
    /// Read and write cursors, padded apart.
    pub(crate) cursors: Cursors,

    /// Number of slots in the backing storage.
    pub(crate) capacity: usize,
}

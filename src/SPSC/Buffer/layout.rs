use crossbeam_utils::CachePadded;
use std::sync::atomic::AtomicUsize;

/// The two cursors of a ring, each owned by exactly one side.
///
/// Both sides read both cursors, but only the producer stores `write` and only
/// the consumer stores `read`. Each cursor is padded to its own cache line so a
/// producer publishing `write` never invalidates the line the consumer keeps
/// hot for `read`, and vice versa.
#[repr(C)]
pub struct Cursors {
    /// Start index of committed, unread data. Stored by the consumer.
    pub read: CachePadded<AtomicUsize>,

    /// Next index to write. Stored by the producer.
    pub write: CachePadded<AtomicUsize>,
}

impl Cursors {
    pub(crate) fn new() -> Self {
        Self {
            read: CachePadded::new(AtomicUsize::new(0)),
            write: CachePadded::new(AtomicUsize::new(0)),
        }
    }
}

use std::fmt;

use crate::Framing::Parser;
use crate::SPSC::Buffer::RingBuffer;

/// Debug function for RingBuffer
///
/// Shows:
/// - Capacity
/// - Read and write cursors (a snapshot, the other side may move them)
/// - Filled and free counts derived from that snapshot
pub fn debug_ring_buffer(ring: &RingBuffer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (read, write) = ring.cursor_positions();
    f.debug_struct("RingBuffer")
        .field("capacity", &ring.capacity())
        .field("read", &read)
        .field("write", &write)
        .field("len", &ring.len())
        .field("free", &ring.free())
        .finish()
}

/// Debug function for the two channel ends
///
/// The slot storage is opaque; only the ring state is shown.
pub fn debug_channel_end(name: &str, ring: &RingBuffer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct(name)
        .field("storage", &"<opaque>")
        .field("ring", ring)
        .finish()
}

/// Debug function for Parser
///
/// Shows the state machine position and counters, not the matcher.
pub fn debug_parser<M>(parser: &Parser<M>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Parser")
        .field("status", &parser.status())
        .field("layout", parser.layout())
        .field("fill", &parser.fill())
        .field("declared_frame_size", &parser.declared_frame_size())
        .field("skipped", &parser.skipped())
        .finish_non_exhaustive()
}

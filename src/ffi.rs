use crate::Framing::magic::MagicMatcher;
use crate::Framing::{Parser, Progress};
use crate::SPSC::Buffer::RingBuffer;
use crate::SPSC::Structs::{IndexRange, RangePair};
use std::ptr;

// Status codes
pub const RR_SUCCESS: i32 = 0;
pub const RR_ERROR_NULL_POINTER: i32 = -1;
pub const RR_ERROR_INVALID_ARG: i32 = -2;
pub const RR_ERROR_FATAL: i32 = -3;

// Values returned by `rr_parser_add_byte`
pub const RR_PARSER_NOT_FINISHED: i32 = 0;
pub const RR_PARSER_FINISHED_BAD: i32 = 1;
pub const RR_PARSER_FINISHED_GOOD: i32 = 2;

/// C mirror of [`IndexRange`]: inclusive, empty when `start = 1, end = 0`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RrRange {
    pub start: usize,
    pub end: usize,
}

/// C mirror of [`RangePair`]: visit `ranges[0]` before `ranges[1]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RrRangePair {
    pub ranges: [RrRange; 2],
}

impl From<IndexRange> for RrRange {
    fn from(r: IndexRange) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

impl From<RangePair> for RrRangePair {
    fn from(p: RangePair) -> Self {
        Self {
            ranges: [p.first().into(), p.second().into()],
        }
    }
}

/// Magic comparator supplied from C: returns true while `len` bytes at `bytes` may still be a magic.
pub type RrMagicFn = extern "C" fn(bytes: *const u8, len: usize) -> bool;

/// Adapter giving a C comparator the [`MagicMatcher`] interface.
pub struct CMagic(RrMagicFn);

impl MagicMatcher for CMagic {
    fn matches_prefix(&self, candidate: &[u8]) -> bool {
        (self.0)(candidate.as_ptr(), candidate.len())
    }
}

/// Handle to a ring (opaque pointer)
pub struct RingHandle {
    inner: RingBuffer,
}

/// Handle to a parser (opaque pointer)
pub struct ParserHandle {
    inner: Parser<CMagic>,
}

// -----------------------------------------------------------------------------
// Ring API
// -----------------------------------------------------------------------------

/// Create a new ring tracking `capacity` slots.
///
/// # Returns
/// * Pointer to `RingHandle`, or NULL if the capacity is rejected.
#[no_mangle]
pub extern "C" fn rr_ring_new(capacity: usize) -> *mut RingHandle {
    match RingBuffer::new(capacity) {
        Ok(ring) => Box::into_raw(Box::new(RingHandle { inner: ring })),
        Err(e) => {
            log::warn!("rr_ring_new: {e}");
            ptr::null_mut()
        }
    }
}

/// Ranges free for writing.
///
/// # Safety
/// `handle` must come from `rr_ring_new` and `out` must be writable, or either may be NULL.
#[no_mangle]
pub unsafe extern "C" fn rr_ring_write_ranges(handle: *const RingHandle, out: *mut RrRangePair) -> i32 {
    if handle.is_null() || out.is_null() {
        return RR_ERROR_NULL_POINTER;
    }
    // SAFETY: checked non-null, validity guaranteed by the caller.
    unsafe { *out = (*handle).inner.write_ranges().into() };
    RR_SUCCESS
}

/// Ranges holding committed, unread elements.
///
/// # Safety
/// Same as `rr_ring_write_ranges`.
#[no_mangle]
pub unsafe extern "C" fn rr_ring_read_ranges(handle: *const RingHandle, out: *mut RrRangePair) -> i32 {
    if handle.is_null() || out.is_null() {
        return RR_ERROR_NULL_POINTER;
    }
    // SAFETY: checked non-null, validity guaranteed by the caller.
    unsafe { *out = (*handle).inner.read_ranges().into() };
    RR_SUCCESS
}

/// Commit `n` written elements. Producer thread only.
///
/// # Returns
/// * `RR_ERROR_INVALID_ARG` if `n` exceeds the free space; nothing is committed.
///
/// # Safety
/// `handle` must come from `rr_ring_new`, or be NULL.
#[no_mangle]
pub unsafe extern "C" fn rr_ring_commit_write(handle: *const RingHandle, n: usize) -> i32 {
    if handle.is_null() {
        return RR_ERROR_NULL_POINTER;
    }
    // SAFETY: checked non-null, validity guaranteed by the caller.
    let ring = unsafe { &(*handle).inner };
    if n > ring.free() {
        return RR_ERROR_INVALID_ARG;
    }
    ring.commit_write(n);
    RR_SUCCESS
}

/// Commit `n` consumed elements. Consumer thread only.
///
/// # Returns
/// * `RR_ERROR_INVALID_ARG` if `n` exceeds the filled space; nothing is committed.
///
/// # Safety
/// `handle` must come from `rr_ring_new`, or be NULL.
#[no_mangle]
pub unsafe extern "C" fn rr_ring_commit_read(handle: *const RingHandle, n: usize) -> i32 {
    if handle.is_null() {
        return RR_ERROR_NULL_POINTER;
    }
    // SAFETY: checked non-null, validity guaranteed by the caller.
    let ring = unsafe { &(*handle).inner };
    if n > ring.len() {
        return RR_ERROR_INVALID_ARG;
    }
    ring.commit_read(n);
    RR_SUCCESS
}

/// Free a ring handle.
///
/// # Safety
/// `handle` must come from `rr_ring_new` and not be used afterwards, or be NULL.
#[no_mangle]
pub unsafe extern "C" fn rr_ring_free(handle: *mut RingHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle); // Dropped automatically
        }
    }
}

// -----------------------------------------------------------------------------
// Parser API
// -----------------------------------------------------------------------------

/// Create a new parser.
///
/// # Arguments
/// * `magic_width`, `length_width`, `checksum_width` - Field widths in bytes.
/// * `max_frame_size` - Largest accepted total frame size.
/// * `is_magic` - Prefix comparator for the magic field.
///
/// # Returns
/// * Pointer to `ParserHandle`, or NULL if the configuration is rejected.
#[no_mangle]
pub extern "C" fn rr_parser_new(
    magic_width: usize,
    length_width: usize,
    checksum_width: usize,
    max_frame_size: usize,
    is_magic: Option<RrMagicFn>,
) -> *mut ParserHandle {
    let Some(is_magic) = is_magic else {
        return ptr::null_mut();
    };
    match Parser::new(magic_width, length_width, checksum_width, max_frame_size, CMagic(is_magic)) {
        Ok(parser) => Box::into_raw(Box::new(ParserHandle { inner: parser })),
        Err(e) => {
            log::warn!("rr_parser_new: {e}");
            ptr::null_mut()
        }
    }
}

/// Feed one byte.
///
/// # Returns
/// * `RR_PARSER_NOT_FINISHED`, `RR_PARSER_FINISHED_BAD` or `RR_PARSER_FINISHED_GOOD`.
/// * `RR_ERROR_FATAL` if the parser is in a terminal state and must be reset.
///
/// # Safety
/// `handle` must come from `rr_parser_new`, or be NULL.
#[no_mangle]
pub unsafe extern "C" fn rr_parser_add_byte(handle: *mut ParserHandle, byte: u8) -> i32 {
    if handle.is_null() {
        return RR_ERROR_NULL_POINTER;
    }
    // SAFETY: checked non-null, validity guaranteed by the caller.
    let parser = unsafe { &mut (*handle).inner };
    match parser.add_byte(byte) {
        Progress::NotFinished => RR_PARSER_NOT_FINISHED,
        Progress::FinishedBad => RR_PARSER_FINISHED_BAD,
        Progress::FinishedGood => RR_PARSER_FINISHED_GOOD,
        Progress::FatalError => RR_ERROR_FATAL,
    }
}

/// Bytes discarded since creation or the last reset. Returns 0 for NULL.
///
/// # Safety
/// `handle` must come from `rr_parser_new`, or be NULL.
#[no_mangle]
pub unsafe extern "C" fn rr_parser_skipped(handle: *const ParserHandle) -> usize {
    if handle.is_null() {
        return 0;
    }
    // SAFETY: checked non-null, validity guaranteed by the caller.
    unsafe { (*handle).inner.skipped() }
}

/// Return the parser to its initial state.
///
/// # Safety
/// `handle` must come from `rr_parser_new`, or be NULL.
#[no_mangle]
pub unsafe extern "C" fn rr_parser_reset(handle: *mut ParserHandle) -> i32 {
    if handle.is_null() {
        return RR_ERROR_NULL_POINTER;
    }
    // SAFETY: checked non-null, validity guaranteed by the caller.
    unsafe { (*handle).inner.reset() };
    RR_SUCCESS
}

/// Free a parser handle.
///
/// # Safety
/// `handle` must come from `rr_parser_new` and not be used afterwards, or be NULL.
#[no_mangle]
pub unsafe extern "C" fn rr_parser_free(handle: *mut ParserHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle);
        }
    }
}

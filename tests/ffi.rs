// The C ABI exercised from Rust, the way a C caller would use it.

use rangering::ffi::*;
use std::ptr;

extern "C" fn is_magic(bytes: *const u8, len: usize) -> bool {
    // SAFETY: the parser passes a pointer to `len` initialized bytes.
    let candidate = unsafe { std::slice::from_raw_parts(bytes, len) };
    [0x55u8, 0x55].starts_with(candidate)
}

const EMPTY_FRAME: [u8; 8] = [0x55, 0x55, 0x08, 0x00, 0xdf, 0x46, 0x39, 0x7f];

#[test]
fn ring_round_trip() {
    let ring = rr_ring_new(5);
    assert!(!ring.is_null());

    let mut ranges = RrRangePair::default();
    unsafe {
        assert_eq!(rr_ring_write_ranges(ring, &mut ranges), RR_SUCCESS);
        assert_eq!(ranges.ranges[0], RrRange { start: 1, end: 0 });
        assert_eq!(ranges.ranges[1], RrRange { start: 0, end: 3 });

        assert_eq!(rr_ring_commit_write(ring, 4), RR_SUCCESS);
        assert_eq!(rr_ring_commit_write(ring, 1), RR_ERROR_INVALID_ARG);

        assert_eq!(rr_ring_read_ranges(ring, &mut ranges), RR_SUCCESS);
        assert_eq!(ranges.ranges[1], RrRange { start: 0, end: 3 });

        assert_eq!(rr_ring_commit_read(ring, 5), RR_ERROR_INVALID_ARG);
        assert_eq!(rr_ring_commit_read(ring, 3), RR_SUCCESS);
        assert_eq!(rr_ring_commit_write(ring, 2), RR_SUCCESS);

        assert_eq!(rr_ring_read_ranges(ring, &mut ranges), RR_SUCCESS);
        assert_eq!(ranges.ranges[0], RrRange { start: 3, end: 4 });
        assert_eq!(ranges.ranges[1], RrRange { start: 0, end: 0 });

        rr_ring_free(ring);
    }
}

#[test]
fn ring_rejects_bad_input() {
    assert!(rr_ring_new(1).is_null());

    let mut ranges = RrRangePair::default();
    unsafe {
        assert_eq!(rr_ring_write_ranges(ptr::null(), &mut ranges), RR_ERROR_NULL_POINTER);
        assert_eq!(rr_ring_read_ranges(ptr::null(), &mut ranges), RR_ERROR_NULL_POINTER);
        assert_eq!(rr_ring_commit_write(ptr::null(), 1), RR_ERROR_NULL_POINTER);
        assert_eq!(rr_ring_commit_read(ptr::null(), 1), RR_ERROR_NULL_POINTER);

        let ring = rr_ring_new(4);
        assert_eq!(rr_ring_write_ranges(ring, ptr::null_mut()), RR_ERROR_NULL_POINTER);
        rr_ring_free(ring);
        rr_ring_free(ptr::null_mut());
    }
}

#[test]
fn parser_round_trip() {
    let parser = rr_parser_new(2, 2, 4, 64, Some(is_magic));
    assert!(!parser.is_null());

    unsafe {
        assert_eq!(rr_parser_add_byte(parser, 0x00), RR_PARSER_NOT_FINISHED);
        let (last, body) = EMPTY_FRAME.split_last().unwrap();
        for &b in body {
            assert_eq!(rr_parser_add_byte(parser, b), RR_PARSER_NOT_FINISHED);
        }
        assert_eq!(rr_parser_add_byte(parser, *last), RR_PARSER_FINISHED_GOOD);
        assert_eq!(rr_parser_skipped(parser), 1);

        assert_eq!(rr_parser_add_byte(parser, 0x00), RR_ERROR_FATAL);

        assert_eq!(rr_parser_reset(parser), RR_SUCCESS);
        assert_eq!(rr_parser_skipped(parser), 0);

        assert_eq!(rr_parser_add_byte(parser, 0x55), RR_PARSER_NOT_FINISHED);
        assert_eq!(rr_parser_add_byte(parser, 0x01), RR_PARSER_FINISHED_BAD);

        rr_parser_free(parser);
    }
}

#[test]
fn parser_rejects_bad_input() {
    assert!(rr_parser_new(2, 3, 4, 64, Some(is_magic)).is_null());
    assert!(rr_parser_new(2, 2, 4, 64, None).is_null());

    unsafe {
        assert_eq!(rr_parser_add_byte(ptr::null_mut(), 0), RR_ERROR_NULL_POINTER);
        assert_eq!(rr_parser_reset(ptr::null_mut()), RR_ERROR_NULL_POINTER);
        assert_eq!(rr_parser_skipped(ptr::null()), 0);
        rr_parser_free(ptr::null_mut());
    }
}

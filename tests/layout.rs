// Layout conformance tests for the types shared with C callers.
// They also print the observed values to aid debugging when a mismatch
// occurs on a given platform.
use crossbeam_utils::CachePadded;
use memoffset::offset_of;
use rangering::ffi::{RrRange, RrRangePair};
use rangering::SPSC::Buffer::layout::Cursors;
use rangering::SPSC::Structs::{IndexRange, RangePair};
use std::mem::{align_of, size_of};
use std::sync::atomic::AtomicUsize;

#[test]
fn test_cursors_on_separate_cache_lines() {
    let padded = size_of::<CachePadded<AtomicUsize>>();
    let off_read = offset_of!(Cursors, read);
    let off_write = offset_of!(Cursors, write);

    println!(
        "Cursors => size: {}, align: {}, offsets: [read:{off_read}, write:{off_write}], padded cursor: {padded}",
        size_of::<Cursors>(),
        align_of::<Cursors>()
    );

    assert_eq!(off_read, 0);
    assert_eq!(off_write, padded);
    assert!(off_write >= 64);
    assert_eq!(size_of::<Cursors>(), 2 * padded);
}

#[test]
fn test_range_layout_matches_c_mirror() {
    let word = size_of::<usize>();

    assert_eq!(size_of::<IndexRange>(), 2 * word);
    assert_eq!(offset_of!(IndexRange, start), 0);
    assert_eq!(offset_of!(IndexRange, end), word);

    assert_eq!(size_of::<RrRange>(), size_of::<IndexRange>());
    assert_eq!(offset_of!(RrRange, start), 0);
    assert_eq!(offset_of!(RrRange, end), word);

    assert_eq!(size_of::<RangePair>(), 4 * word);
    assert_eq!(size_of::<RrRangePair>(), size_of::<RangePair>());
    assert_eq!(align_of::<RrRangePair>(), align_of::<usize>());
}

#[test]
fn test_c_mirror_conversion() {
    let pair = RangePair::wrapped(IndexRange::new(6, 9), IndexRange::new(0, 2));
    let c: RrRangePair = pair.into();
    assert_eq!(c.ranges[0], RrRange { start: 6, end: 9 });
    assert_eq!(c.ranges[1], RrRange { start: 0, end: 2 });

    let empty: RrRangePair = RangePair::EMPTY.into();
    assert_eq!(empty.ranges[0], RrRange { start: 1, end: 0 });
}

use rangering::SPSC::ChannelBuilder;
use rangering::ConfigError;
use std::thread;

use crossbeam_utils::Backoff;

#[test]
fn push_pop_single_thread() {
    let (mut tx, mut rx) = ChannelBuilder::new().with_capacity(4).build::<u32>().unwrap();
    assert_eq!(tx.capacity(), 4);
    assert_eq!(tx.free(), 3);

    assert_eq!(tx.push(1), Ok(()));
    assert_eq!(tx.push(2), Ok(()));
    assert_eq!(tx.push(3), Ok(()));
    assert_eq!(tx.push(4), Err(4));

    assert_eq!(rx.len(), 3);
    assert_eq!(rx.pop(), Some(1));
    assert_eq!(tx.push(4), Ok(()));
    assert_eq!(rx.pop(), Some(2));
    assert_eq!(rx.pop(), Some(3));
    assert_eq!(rx.pop(), Some(4));
    assert_eq!(rx.pop(), None);
    assert!(rx.is_empty());
}

#[test]
fn slices_across_the_wrap() {
    let (mut tx, mut rx) = ChannelBuilder::new().with_capacity(8).build::<u8>().unwrap();
    assert_eq!(tx.push_slice(&[0; 5]), 5);
    let mut sink = [0u8; 5];
    assert_eq!(rx.pop_slice(&mut sink), 5);

    // Cursors at 5: the next write spans 5..=7 then 0..=3.
    assert_eq!(tx.push_slice(&[10, 11, 12, 13, 14, 15, 16, 17, 18]), 7);
    assert_eq!(rx.read_ranges().first().start, 5);
    assert_eq!(rx.read_ranges().second().end, 3);

    assert_eq!(rx.get(0), Some(10));
    assert_eq!(rx.get(3), Some(13));
    assert_eq!(rx.get(6), Some(16));
    assert_eq!(rx.get(7), None);

    let mut peeked = Vec::new();
    assert_eq!(rx.peek_into(5, &mut peeked), 5);
    assert_eq!(peeked, [10, 11, 12, 13, 14]);
    assert_eq!(rx.len(), 7);

    let mut out = [0u8; 16];
    assert_eq!(rx.pop_slice(&mut out), 7);
    assert_eq!(&out[..7], &[10, 11, 12, 13, 14, 15, 16]);
}

#[test]
fn write_with_and_read_with_report_partial_counts() {
    let (mut tx, mut rx) = ChannelBuilder::new().with_capacity(6).build::<u16>().unwrap();

    let written = tx.write_with(|head, tail| {
        assert!(head.is_empty());
        assert_eq!(tail.len(), 5);
        tail[0] = 7;
        tail[1] = 8;
        2
    });
    assert_eq!(written, 2);

    let read = rx.read_with(|head, tail| {
        assert!(head.is_empty());
        assert_eq!(tail, &[7, 8]);
        1
    });
    assert_eq!(read, 1);
    assert_eq!(rx.pop(), Some(8));
}

#[test]
#[should_panic(expected = "free slots")]
fn write_with_rejects_overreporting() {
    let (mut tx, _rx) = ChannelBuilder::new().with_capacity(4).build::<u8>().unwrap();
    tx.write_with(|_, _| 4);
}

#[test]
fn contiguous_blocks_skip_the_tail() {
    let (mut tx, mut rx) = ChannelBuilder::new().with_capacity(8).build::<u8>().unwrap();
    tx.push_slice(&[0; 5]);
    rx.skip(5);

    // Free space is 5..=7 and 0..=3: three slots at the end, four at the front.
    let slot = tx
        .write_contiguous(4, |block| block.copy_from_slice(&[1, 2, 3, 4]))
        .unwrap();
    assert_eq!(slot.start, 0);
    assert_eq!(slot.consumed, 7);
    assert_eq!(rx.len(), 7);

    // The consumer learns the skip out of band and drops the unused tail.
    rx.skip(slot.consumed - 4);
    let mut block = Vec::new();
    rx.peek_into(4, &mut block);
    assert_eq!(block, [1, 2, 3, 4]);
    rx.skip(4);

    assert!(tx.write_contiguous(8, |_| unreachable!()).is_none());
    assert!(tx.write_contiguous(0, |_| unreachable!()).is_none());
    assert!(rx.is_empty());
}

#[test]
fn builder_rejects_small_capacity() {
    let err = ChannelBuilder::new().with_capacity(1).build::<u8>().unwrap_err();
    assert_eq!(err, ConfigError::CapacityTooSmall { capacity: 1 });
}

#[test]
fn default_capacity() {
    let (tx, rx) = ChannelBuilder::default().build::<u8>().unwrap();
    assert_eq!(tx.capacity(), 1024);
    assert_eq!(tx.free(), 1023);
    assert!(format!("{rx:?}").contains("Consumer"));
    assert!(format!("{tx:?}").contains("capacity: 1024"));
}

#[test]
fn threaded_stream_arrives_in_order() {
    const TOTAL: u64 = 500_000;
    let (mut tx, mut rx) = ChannelBuilder::new().with_capacity(1000).build::<u64>().unwrap();

    let producer = thread::spawn(move || {
        let backoff = Backoff::new();
        let mut next = 0u64;
        let mut chunk = Vec::with_capacity(64);
        while next < TOTAL {
            chunk.clear();
            let end = (next + 64).min(TOTAL);
            chunk.extend(next..end);
            let mut sent = 0;
            while sent < chunk.len() {
                let n = tx.push_slice(&chunk[sent..]);
                if n == 0 {
                    backoff.snooze();
                } else {
                    backoff.reset();
                }
                sent += n;
            }
            next = end;
        }
    });

    let backoff = Backoff::new();
    let mut buf = [0u64; 100];
    let mut expected = 0u64;
    while expected < TOTAL {
        let n = rx.pop_slice(&mut buf);
        if n == 0 {
            backoff.snooze();
            continue;
        }
        backoff.reset();
        for &value in &buf[..n] {
            assert_eq!(value, expected);
            expected += 1;
        }
    }

    producer.join().unwrap();
    assert!(rx.is_empty());
}

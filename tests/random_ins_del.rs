// Randomized insert/delete runs against a ring driving caller-owned storage.
//
// Each test is seeded so a failure reproduces; the seed is printed on start.

use rangering::SPSC::Buffer::RingBuffer;
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::sync::Arc;
use std::thread;

use crossbeam_utils::Backoff;

#[test]
fn random_insert_delete_keeps_order() {
    let seed = 0x5eed_0001;
    println!("seed: {seed:#x}");
    let mut rng = fastrand::Rng::with_seed(seed);

    for capacity in 2..40 {
        let ring = RingBuffer::new(capacity).unwrap();
        let mut storage = vec![u64::MAX; capacity];
        let mut next_write = 0u64;
        let mut next_read = 0u64;

        for _ in 0..2_000 {
            if rng.bool() {
                let ranges = ring.write_ranges();
                let n = rng.usize(0..=ranges.total_len());
                for index in ranges.indices().take(n) {
                    storage[index] = next_write;
                    next_write += 1;
                }
                ring.commit_write(n);
            } else {
                let ranges = ring.read_ranges();
                let n = rng.usize(0..=ranges.total_len());
                for index in ranges.indices().take(n) {
                    assert_eq!(storage[index], next_read, "capacity {capacity}");
                    next_read += 1;
                }
                ring.commit_read(n);
            }

            assert_eq!(ring.len() as u64, next_write - next_read);
            assert_eq!(ring.len() + ring.free(), capacity - 1);
        }
    }
}

#[test]
fn threaded_insert_delete_over_atomic_slots() {
    const TOTAL: u64 = 200_000;
    let capacity = 37;

    let ring = Arc::new(RingBuffer::new(capacity).unwrap());
    let slots: Arc<Vec<AtomicU64>> = Arc::new((0..capacity).map(|_| AtomicU64::new(0)).collect());

    let producer = {
        let ring = Arc::clone(&ring);
        let slots = Arc::clone(&slots);
        thread::spawn(move || {
            let mut rng = fastrand::Rng::with_seed(0x5eed_0002);
            let backoff = Backoff::new();
            let mut next = 0u64;
            while next < TOTAL {
                let ranges = ring.write_ranges();
                if ranges.is_empty() {
                    backoff.snooze();
                    continue;
                }
                backoff.reset();
                let n = rng.usize(1..=ranges.total_len()).min((TOTAL - next) as usize);
                for index in ranges.indices().take(n) {
                    // Ordered by the release store in `commit_write`.
                    slots[index].store(next, Relaxed);
                    next += 1;
                }
                ring.commit_write(n);
            }
        })
    };

    let mut rng = fastrand::Rng::with_seed(0x5eed_0003);
    let backoff = Backoff::new();
    let mut expected = 0u64;
    while expected < TOTAL {
        let ranges = ring.read_ranges();
        if ranges.is_empty() {
            backoff.snooze();
            continue;
        }
        backoff.reset();
        let n = rng.usize(1..=ranges.total_len());
        for index in ranges.indices().take(n) {
            assert_eq!(slots[index].load(Relaxed), expected);
            expected += 1;
        }
        ring.commit_read(n);
    }

    producer.join().unwrap();
    assert!(ring.is_empty());
}

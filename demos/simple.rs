// In demos/simple.rs
//
// The ring owns no data: it hands out index ranges over a Vec we own.
use rangering::SPSC::Buffer::RingBuffer;

fn main() -> Result<(), rangering::ConfigError> {
    const CAPACITY: usize = 100;
    let to_insert: Vec<i32> = (0..20).collect();

    let ring = RingBuffer::new(CAPACITY)?;
    let mut storage = vec![0i32; CAPACITY];

    let free = ring.write_ranges();
    if free.total_len() < to_insert.len() {
        eprintln!("not enough room: {} free", free.total_len());
        std::process::exit(1);
    }

    // Copy into the free ranges, range 0 first.
    let mut copied = 0;
    for range in free.iter() {
        let n = range.len().min(to_insert.len() - copied);
        let start = range.as_range().start;
        storage[start..start + n].copy_from_slice(&to_insert[copied..copied + n]);
        copied += n;
    }
    ring.commit_write(copied);
    println!("wrote {copied} values, ring: {ring:?}");

    let filled = ring.read_ranges();
    for index in filled.indices() {
        println!("{}", storage[index]);
    }
    ring.commit_read(filled.total_len());

    assert_eq!(ring.free(), CAPACITY - 1);
    assert!(ring.is_empty());
    println!("all space available again: {} free", ring.free());
    Ok(())
}

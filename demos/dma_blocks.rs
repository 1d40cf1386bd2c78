// In demos/dma_blocks.rs
//
// Fixed-size blocks that must stay contiguous, as a DMA engine would write
// them. When a block does not fit before the end of the storage the writer
// skips the tail, so a second channel carries where each block really is.
use crossbeam_utils::Backoff;
use rangering::SPSC::ChannelBuilder;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Where a block landed in the data ring.
#[derive(Copy, Clone, Debug, Default)]
struct BlockIndex {
    start: usize,
    /// Slots to release for this block, including any skipped tail.
    consumed: usize,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let blocks: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let block_len: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(37);
    if !(1..1000).contains(&block_len) {
        eprintln!("Usage: {} [blocks] [block_len < 1000]", args[0]);
        std::process::exit(1);
    }

    let running = Arc::new(AtomicBool::new(true));
    let running_for_handler = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_for_handler.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let (mut data_tx, mut data_rx) = ChannelBuilder::new()
        .with_capacity(1000)
        .build::<u32>()
        .expect("data ring");
    let (mut index_tx, mut index_rx) = ChannelBuilder::new()
        .with_capacity(16)
        .build::<BlockIndex>()
        .expect("index ring");

    println!("Writer: {blocks} blocks of {block_len} words");

    let writer_running = Arc::clone(&running);
    let writer = thread::spawn(move || {
        let mut rng = fastrand::Rng::with_seed(2021);
        let backoff = Backoff::new();
        let mut skipped_tail = 0usize;
        let mut k = 0;

        while k < blocks && writer_running.load(Ordering::Relaxed) {
            if index_tx.free() == 0 {
                backoff.snooze();
                continue;
            }
            let slot = data_tx.write_contiguous(block_len, |block| {
                let (body, last) = block.split_at_mut(block_len - 1);
                let mut xor = 0;
                for word in body.iter_mut() {
                    *word = rng.u32(..);
                    xor ^= *word;
                }
                last[0] = xor;
            });
            let Some(slot) = slot else {
                backoff.snooze();
                continue;
            };
            backoff.reset();
            skipped_tail += slot.consumed - block_len;

            let pushed = index_tx.push(BlockIndex {
                start: slot.start,
                consumed: slot.consumed,
            });
            debug_assert!(pushed.is_ok(), "index ring checked for room above");
            k += 1;
        }
        eprintln!("Writer finished: {k} blocks, {skipped_tail} tail slots skipped.");
    });

    let backoff = Backoff::new();
    let mut block = Vec::with_capacity(block_len);
    let mut k = 0;
    while k < blocks && running.load(Ordering::Relaxed) {
        let Some(index) = index_rx.pop() else {
            backoff.snooze();
            continue;
        };
        backoff.reset();

        // The block is the last `block_len` of the slots it consumed.
        data_rx.skip(index.consumed - block_len);
        block.clear();
        data_rx.peek_into(block_len, &mut block);
        let xor = block.iter().fold(0, |acc, w| acc ^ w);
        if xor != 0 {
            eprintln!("bad checksum in block {k} at {}: {xor:#x}", index.start);
            std::process::exit(1);
        }
        data_rx.skip(block_len);
        k += 1;
    }

    writer.join().expect("writer thread panicked");
    eprintln!("Reader finished: {k} blocks OK.");
}

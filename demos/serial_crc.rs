// In demos/serial_crc.rs
//
// A simulated serial line: the writer thread emits CRC-protected frames mixed
// with random noise, the reader extracts them with a FrameReader.
use crossbeam_utils::Backoff;
use rangering::Framing::Structs::FrameLayout;
use rangering::Framing::{FixedMagic, FrameEncoder, FrameReader, Parser};
use rangering::SPSC::ChannelBuilder;
use std::env;
use std::thread;
use std::time::{Duration, Instant};

const MAGIC: [u8; 2] = [0x55, 0x55];

fn main() {
    let args: Vec<String> = env::args().collect();
    let frames: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let noisy = !args.iter().any(|a| a == "--clean");

    let layout = FrameLayout::new(MAGIC.len(), 2, 4, 200).expect("frame layout");
    let (mut tx, mut rx) = ChannelBuilder::new()
        .with_capacity(4096)
        .build::<u8>()
        .expect("byte ring");

    let writer = thread::spawn(move || {
        let enc = FrameEncoder::new(layout, MAGIC).expect("encoder");
        let mut rng = fastrand::Rng::with_seed(3);
        let backoff = Backoff::new();
        let mut line = Vec::new();

        for seq in 0..frames {
            line.clear();
            if noisy {
                line.extend((0..rng.usize(0..16)).map(|_| rng.u8(..)));
            }
            let mut payload = seq.to_le_bytes().to_vec();
            payload.extend((0..rng.usize(0..100)).map(|_| rng.u8(..)));
            enc.encode_into(&payload, &mut line).expect("payload fits");

            let mut sent = 0;
            while sent < line.len() {
                let n = tx.push_slice(&line[sent..]);
                if n == 0 {
                    backoff.snooze();
                } else {
                    backoff.reset();
                }
                sent += n;
            }
        }
        // Flush a pending candidate opened by trailing noise.
        let mut sent = 0;
        let padding = [0u8; 256];
        while sent < padding.len() {
            sent += tx.push_slice(&padding[sent..]);
            thread::yield_now();
        }
        eprintln!("Writer finished: {frames} frames.");
    });

    let parser = Parser::with_layout(layout, FixedMagic::new(MAGIC));
    let mut reader = FrameReader::new(parser);
    let mut received = 0u32;
    let mut out_of_order = 0u32;
    let start = Instant::now();
    let deadline = start + Duration::from_secs(60);

    while received < frames {
        if Instant::now() > deadline {
            eprintln!("Timed out: {received} of {frames} frames.");
            std::process::exit(1);
        }
        let got = reader.poll(&mut rx, |frame| {
            let payload = layout.payload_of(frame);
            let seq = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
            if seq != received {
                out_of_order += 1;
            }
            received = seq + 1;
        });
        match got {
            Ok(0) => thread::yield_now(),
            Ok(_) => {}
            Err(e) => {
                eprintln!("reader failed: {e}");
                std::process::exit(1);
            }
        }
    }

    writer.join().expect("writer thread panicked");
    let stats = reader.stats();
    println!(
        "Reader finished in {:.2?}: {} good, {} rejected candidates, {} bytes discarded, {} gaps",
        start.elapsed(),
        stats.good,
        stats.bad,
        stats.discarded,
        out_of_order
    );
}

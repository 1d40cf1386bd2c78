// Glue between a byte channel and the parser.
//
// Bytes stay in the ring until they either complete a frame or are discarded,
// so a rejected candidate can be replayed from its second byte.

use crate::error::FrameError;
use crate::Framing::magic::MagicMatcher;
use crate::Framing::{Parser, Progress};
use crate::SPSC::Consumer;

/// Counters accumulated by a [`FrameReader`] over its lifetime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReaderStats {
    /// Frames delivered.
    pub good: u64,
    /// Candidates rejected (bad magic continuation, bad length, bad checksum).
    pub bad: u64,
    /// Bytes released from the ring without being part of a frame.
    pub discarded: u64,
}

/// Extracts frames from the unread bytes of a [`Consumer<u8>`].
pub struct FrameReader<M> {
    parser: Parser<M>,
    /// Bytes of the current attempt already fed, counted from the read cursor.
    fed: usize,
    stats: ReaderStats,
    frame: Vec<u8>,
}

impl<M: MagicMatcher> FrameReader<M> {
    pub fn new(parser: Parser<M>) -> Self {
        let frame = Vec::with_capacity(parser.layout().max_frame_size().min(64 * 1024));
        Self {
            parser,
            fed: 0,
            stats: ReaderStats::default(),
            frame,
        }
    }

    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    pub fn parser(&self) -> &Parser<M> {
        &self.parser
    }

    /// Bytes fed into the frame candidate currently in progress.
    pub fn pending(&self) -> usize {
        self.fed
    }

    /// Feed every unread byte not yet seen to the parser, calling `on_frame`
    /// with each complete frame. Returns the number of frames delivered.
    ///
    /// Bytes that cannot start a frame are released immediately. When a
    /// candidate is rejected only its first byte is released and the rest are
    /// fed again, so a frame starting inside a rejected candidate is still found.
    ///
    /// # Errors
    /// * `FrameError::RingTooSmall` if the ring cannot hold a frame of the
    ///   layout's maximum size; nothing is consumed.
    /// * `FrameError::ParserFault` if the parser reports a fatal error.
    pub fn poll<F>(&mut self, consumer: &mut Consumer<u8>, mut on_frame: F) -> Result<usize, FrameError>
    where
        F: FnMut(&[u8]),
    {
        // Candidate bytes stay in the ring until resolved, so a frame must fit whole.
        let usable = consumer.capacity() - 1;
        let max_frame = self.parser.layout().max_frame_size();
        if usable < max_frame {
            log::error!("ring of {usable} usable bytes cannot hold {max_frame}-byte frames");
            return Err(FrameError::RingTooSmall { usable, max_frame });
        }

        let mut delivered = 0;

        while let Some(byte) = consumer.get(self.fed) {
            self.fed += 1;

            match self.parser.add_byte(byte) {
                Progress::NotFinished => {
                    if self.parser.is_idle() {
                        // Rejected on its own: it never started a candidate.
                        consumer.skip(self.fed);
                        self.stats.discarded += self.fed as u64;
                        self.fed = 0;
                    }
                }
                Progress::FinishedGood => {
                    self.frame.clear();
                    consumer.peek_into(self.fed, &mut self.frame);
                    on_frame(&self.frame);
                    consumer.skip(self.fed);
                    self.stats.good += 1;
                    delivered += 1;
                    self.restart();
                }
                Progress::FinishedBad => {
                    log::debug!("frame candidate rejected after {} bytes, dropping one", self.fed);
                    consumer.skip(1);
                    self.stats.bad += 1;
                    self.stats.discarded += 1;
                    self.restart();
                }
                Progress::FatalError => return Err(FrameError::ParserFault),
            }
        }

        Ok(delivered)
    }

    fn restart(&mut self) {
        self.parser.reset();
        self.fed = 0;
    }
}

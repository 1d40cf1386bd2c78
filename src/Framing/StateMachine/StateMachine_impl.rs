use std::fmt;

use super::StateMachine::{Parser, ParserStatus, Progress};
use crate::error::ConfigError;
use crate::Framing::checksum::Crc32;
use crate::Framing::magic::MagicMatcher;
use crate::Framing::Structs::FrameLayout;

impl<M: MagicMatcher> Parser<M> {
    /// Create a parser for frames of the given field widths.
    ///
    /// # Errors
    /// Any [`ConfigError`] raised by [`FrameLayout::new`].
    pub fn new(
        magic_width: usize,
        length_width: usize,
        checksum_width: usize,
        max_frame_size: usize,
        magic: M,
    ) -> Result<Self, ConfigError> {
        let layout = FrameLayout::new(magic_width, length_width, checksum_width, max_frame_size)?;
        Ok(Self::with_layout(layout, magic))
    }

    /// Create a parser from an already validated layout.
    pub fn with_layout(layout: FrameLayout, magic: M) -> Self {
        Self {
            status: ParserStatus::AwaitMagic,
            layout,
            magic,
            crc: Crc32::new(),
            field: vec![0u8; layout.field_buffer_len()].into_boxed_slice(),
            fill: 0,
            frame_size: 0,
            payload_len: 0,
            skipped: 0,
        }
    }

    /// Feed the next byte of the stream.
    pub fn add_byte(&mut self, byte: u8) -> Progress {
        match self.status {
            ParserStatus::AwaitMagic => self.on_magic(byte),
            ParserStatus::AwaitLength => self.on_length(byte),
            ParserStatus::AwaitPayload => self.on_payload(byte),
            ParserStatus::AwaitChecksum => self.on_checksum(byte),
            ParserStatus::DoneGood | ParserStatus::DoneBad => {
                log::error!(
                    "byte {byte:#04x} fed to parser in terminal state {}; reset required",
                    self.status
                );
                Progress::FatalError
            }
        }
    }

    fn on_magic(&mut self, byte: u8) -> Progress {
        if self.fill == 0 {
            if !self.magic.matches_prefix(&[byte]) {
                self.skipped += 1;
                return Progress::NotFinished;
            }
            self.crc.reseed();
        }

        self.push_field(byte);
        self.crc.update(byte);

        if !self.magic.matches_prefix(&self.field[..self.fill]) {
            log::debug!("magic candidate abandoned after {} bytes", self.fill);
            self.skipped += 1;
            self.fill = 0;
            return Progress::FinishedBad;
        }
        if self.fill == self.layout.magic_width() {
            log::trace!("magic matched");
            self.fill = 0;
            self.status = ParserStatus::AwaitLength;
        }
        Progress::NotFinished
    }

    fn on_length(&mut self, byte: u8) -> Progress {
        self.push_field(byte);
        self.crc.update(byte);

        let width = self.layout.length_width();
        if self.fill < width.bytes() {
            return Progress::NotFinished;
        }

        self.frame_size = width.decode(&self.field[..self.fill]);
        self.fill = 0;

        let Some(payload) = self.layout.payload_len(self.frame_size) else {
            log::debug!(
                "declared frame size {} outside [{}, {}]",
                self.frame_size,
                self.layout.overhead(),
                self.layout.max_frame_size()
            );
            self.skipped += 1;
            self.status = ParserStatus::AwaitMagic;
            return Progress::FinishedBad;
        };

        // Bounded by `max_frame_size`, so it fits.
        self.payload_len = payload as usize;
        self.status = if self.payload_len > 0 {
            ParserStatus::AwaitPayload
        } else {
            ParserStatus::AwaitChecksum
        };
        log::trace!("frame of {} bytes, {} payload", self.frame_size, self.payload_len);
        Progress::NotFinished
    }

    fn on_payload(&mut self, byte: u8) -> Progress {
        self.crc.update(byte);
        self.fill += 1;
        if self.fill == self.payload_len {
            self.fill = 0;
            self.status = ParserStatus::AwaitChecksum;
        }
        Progress::NotFinished
    }

    fn on_checksum(&mut self, byte: u8) -> Progress {
        self.push_field(byte);

        let width = self.layout.checksum_width();
        if self.fill < width {
            return Progress::NotFinished;
        }

        let mut raw = [0u8; 4];
        raw[..width].copy_from_slice(&self.field[..width]);
        let declared = u32::from_le_bytes(raw);
        let computed = self.layout.truncate_checksum(self.crc.value());

        if declared == computed {
            self.status = ParserStatus::DoneGood;
            Progress::FinishedGood
        } else {
            log::debug!("checksum mismatch: declared {declared:#x}, computed {computed:#x}");
            self.status = ParserStatus::DoneBad;
            self.skipped += 1;
            Progress::FinishedBad
        }
    }

    #[inline]
    fn push_field(&mut self, byte: u8) {
        self.field[self.fill] = byte;
        self.fill += 1;
    }
}

impl<M> Parser<M> {
    /// Bytes discarded since creation or the last `reset`.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[inline]
    pub fn status(&self) -> ParserStatus {
        self.status
    }

    #[inline]
    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Declared total size of the current frame, once its length field is complete.
    pub fn declared_frame_size(&self) -> Option<u64> {
        match self.status {
            ParserStatus::AwaitMagic | ParserStatus::AwaitLength => None,
            _ => Some(self.frame_size),
        }
    }

    /// True when no candidate is in progress: the next byte starts a fresh search.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.status == ParserStatus::AwaitMagic && self.fill == 0
    }

    /// Return to `AwaitMagic` and clear the counters, keeping configuration and buffers.
    pub fn reset(&mut self) {
        self.status = ParserStatus::AwaitMagic;
        self.fill = 0;
        self.frame_size = 0;
        self.payload_len = 0;
        self.skipped = 0;
    }

    /// Fill count of the field currently accumulated, for diagnostics.
    pub(crate) fn fill(&self) -> usize {
        self.fill
    }
}

impl<M> fmt::Debug for Parser<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_parser(self, f)
    }
}

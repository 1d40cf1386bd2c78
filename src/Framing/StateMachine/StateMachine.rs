// A resynchronizing frame parser fed one byte at a time

use std::fmt;

use crate::Framing::checksum::Crc32;
use crate::Framing::Structs::FrameLayout;

/// Where the parser stands within the current frame candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParserStatus {
    /// Looking for the magic sequence; may hold a partial candidate.
    AwaitMagic,
    /// Magic matched, accumulating the length field.
    AwaitLength,
    /// Length accepted, running the checksum over the payload.
    AwaitPayload,
    /// Accumulating the checksum field.
    AwaitChecksum,
    /// A good frame was completed. Terminal until `reset`.
    DoneGood,
    /// The checksum did not match. Terminal until `reset`.
    DoneBad,
}

impl ParserStatus {
    /// `DoneGood` and `DoneBad` accept no bytes until the parser is reset.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ParserStatus::DoneGood | ParserStatus::DoneBad)
    }
}

impl fmt::Display for ParserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParserStatus::AwaitMagic => "await_magic",
            ParserStatus::AwaitLength => "await_length",
            ParserStatus::AwaitPayload => "await_payload",
            ParserStatus::AwaitChecksum => "await_checksum",
            ParserStatus::DoneGood => "done_good",
            ParserStatus::DoneBad => "done_bad",
        };
        f.write_str(name)
    }
}

/// Result of feeding one byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Progress {
    /// More bytes are needed.
    NotFinished,
    /// The current candidate was rejected; one byte was counted as discarded.
    FinishedBad,
    /// A complete frame with a matching checksum ended on this byte.
    FinishedGood,
    /// The byte arrived in a terminal state. Reset or rebuild the parser.
    FatalError,
}

/// Extracts `[magic][length][payload][checksum]` frames from a noisy byte stream.
///
/// Payload bytes are never stored: only the checksum runs over them, so memory
/// use is bounded by the widest fixed field whatever the frame size.
///
/// ### Discard accounting:
/// Every rejected candidate counts exactly one byte as discarded, even when
/// several bytes had been accumulated, because the remaining bytes may start a
/// new valid frame. Replaying them is up to the caller, see
/// [`FrameReader`](crate::Framing::FrameReader).
pub struct Parser<M> {
    pub(crate) status: ParserStatus,
    pub(crate) layout: FrameLayout,
    pub(crate) magic: M,

    /// Checksum over magic, length and payload of the current candidate.
    pub(crate) crc: Crc32,

    /// Scratch space for the field being accumulated (magic, length or checksum).
    pub(crate) field: Box<[u8]>,

    /// Bytes received for the current field, or for the payload.
    pub(crate) fill: usize,

    /// Declared total frame size, valid once the length field is complete.
    pub(crate) frame_size: u64,

    /// Payload bytes expected, derived from `frame_size`.
    pub(crate) payload_len: usize,

    /// Bytes discarded since creation or the last reset.
    pub(crate) skipped: usize,
}

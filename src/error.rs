use thiserror::Error;

/// Rejected configuration, reported at construction time and never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A ring needs at least two slots: one is always kept free to tell full from empty.
    #[error("ring capacity {capacity} is below the minimum of 2")]
    CapacityTooSmall { capacity: usize },

    /// Cursor arithmetic must be able to hold twice the capacity without overflow.
    #[error("ring capacity {capacity} exceeds half of the wide index range")]
    CapacityTooLarge { capacity: usize },

    /// Length fields are decoded as 1, 2, 4 or 8 byte little-endian integers.
    #[error("unsupported length field width {0} (expected 1, 2, 4 or 8)")]
    UnsupportedLengthWidth(usize),

    /// The checksum field carries up to the 4 bytes of a CRC-32.
    #[error("unsupported checksum field width {0} (expected 1 to 4)")]
    UnsupportedChecksumWidth(usize),

    #[error("magic field width must be at least 1")]
    ZeroMagicWidth,

    /// The largest allowed frame cannot even hold the fixed fields.
    #[error("maximum frame size {max} is smaller than the fixed overhead {overhead}")]
    MaxFrameTooSmall { max: usize, overhead: usize },
}

/// Failures while building or extracting frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("magic sequence is {actual} bytes but the layout expects {expected}")]
    MagicWidthMismatch { expected: usize, actual: usize },

    #[error("frame of {size} bytes exceeds the limit of {max}")]
    FrameTooLarge { size: u64, max: u64 },

    /// The ring cannot hold a whole frame, so a candidate could never complete.
    #[error("ring holds {usable} bytes but frames may be {max_frame} bytes")]
    RingTooSmall { usable: usize, max_frame: usize },

    /// The parser was fed while in a terminal state.
    #[error("parser reported a fatal error")]
    ParserFault,
}

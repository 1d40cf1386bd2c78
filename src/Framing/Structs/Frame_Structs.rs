// Wire layout of a frame: [magic][length][payload][checksum]
//
// Multi-byte fields are little-endian. `length` is the total frame size,
// magic and checksum included.

use crate::error::ConfigError;

/// Width of the length field. Only whole unsigned integer widths are supported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LengthWidth {
    U8,
    U16,
    U32,
    U64,
}

impl LengthWidth {
    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            LengthWidth::U8 => 1,
            LengthWidth::U16 => 2,
            LengthWidth::U32 => 4,
            LengthWidth::U64 => 8,
        }
    }

    /// Largest value the field can carry.
    pub const fn max_value(self) -> u64 {
        match self {
            LengthWidth::U8 => u8::MAX as u64,
            LengthWidth::U16 => u16::MAX as u64,
            LengthWidth::U32 => u32::MAX as u64,
            LengthWidth::U64 => u64::MAX,
        }
    }

    /// Decode a little-endian value from exactly `self.bytes()` bytes.
    pub fn decode(self, bytes: &[u8]) -> u64 {
        debug_assert_eq!(bytes.len(), self.bytes());
        match self {
            LengthWidth::U8 => u64::from(bytes[0]),
            LengthWidth::U16 => u64::from(u16::from_le_bytes([bytes[0], bytes[1]])),
            LengthWidth::U32 => {
                u64::from(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            LengthWidth::U64 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&bytes[..8]);
                u64::from_le_bytes(raw)
            }
        }
    }

    /// Append `value` as a little-endian field of this width.
    pub(crate) fn encode(self, value: u64, out: &mut Vec<u8>) {
        out.extend_from_slice(&value.to_le_bytes()[..self.bytes()]);
    }
}

impl TryFrom<usize> for LengthWidth {
    type Error = ConfigError;

    fn try_from(bytes: usize) -> Result<Self, Self::Error> {
        match bytes {
            1 => Ok(LengthWidth::U8),
            2 => Ok(LengthWidth::U16),
            4 => Ok(LengthWidth::U32),
            8 => Ok(LengthWidth::U64),
            other => Err(ConfigError::UnsupportedLengthWidth(other)),
        }
    }
}

/// Maximum checksum field width: the whole CRC-32.
pub const MAX_CHECKSUM_WIDTH: usize = 4;

/// Field widths and size limit shared by the parser and the encoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameLayout {
    magic_width: usize,
    length_width: LengthWidth,
    checksum_width: usize,
    max_frame_size: usize,
}

impl FrameLayout {
    /// Validate and build a layout. All widths are in bytes.
    pub fn new(
        magic_width: usize,
        length_width: usize,
        checksum_width: usize,
        max_frame_size: usize,
    ) -> Result<Self, ConfigError> {
        if magic_width == 0 {
            return Err(ConfigError::ZeroMagicWidth);
        }
        let length_width = LengthWidth::try_from(length_width)?;
        if checksum_width == 0 || checksum_width > MAX_CHECKSUM_WIDTH {
            return Err(ConfigError::UnsupportedChecksumWidth(checksum_width));
        }

        let layout = Self {
            magic_width,
            length_width,
            checksum_width,
            max_frame_size,
        };
        if max_frame_size < layout.overhead() {
            return Err(ConfigError::MaxFrameTooSmall {
                max: max_frame_size,
                overhead: layout.overhead(),
            });
        }
        Ok(layout)
    }

    #[inline]
    pub fn magic_width(&self) -> usize {
        self.magic_width
    }

    #[inline]
    pub fn length_width(&self) -> LengthWidth {
        self.length_width
    }

    #[inline]
    pub fn checksum_width(&self) -> usize {
        self.checksum_width
    }

    #[inline]
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    /// Bytes taken by magic, length and checksum: the size of an empty frame.
    #[inline]
    pub fn overhead(&self) -> usize {
        self.magic_width + self.length_width.bytes() + self.checksum_width
    }

    /// Size of the scratch buffer needed to accumulate any single field.
    pub(crate) fn field_buffer_len(&self) -> usize {
        self.magic_width
            .max(self.length_width.bytes())
            .max(self.checksum_width)
    }

    /// Payload length implied by a declared total size, if that size is acceptable.
    pub fn payload_len(&self, declared: u64) -> Option<u64> {
        if declared > self.max_frame_size as u64 {
            return None;
        }
        declared.checked_sub(self.overhead() as u64)
    }

    /// The payload bytes of a complete frame.
    pub fn payload_of<'a>(&self, frame: &'a [u8]) -> &'a [u8] {
        let start = self.magic_width + self.length_width.bytes();
        let end = frame.len().saturating_sub(self.checksum_width).max(start);
        frame.get(start..end).unwrap_or(&[])
    }

    /// Keep only the low `checksum_width` bytes of a CRC, as they appear on the wire.
    #[inline]
    pub(crate) fn truncate_checksum(&self, crc: u32) -> u32 {
        if self.checksum_width >= MAX_CHECKSUM_WIDTH {
            crc
        } else {
            crc & ((1u32 << (8 * self.checksum_width)) - 1)
        }
    }
}

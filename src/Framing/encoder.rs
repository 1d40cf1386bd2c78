use crate::error::FrameError;
use crate::Framing::checksum::crc32;
use crate::Framing::Structs::FrameLayout;

/// Builds frames the parser accepts: `[magic][length][payload][checksum]`.
#[derive(Clone, Debug)]
pub struct FrameEncoder {
    layout: FrameLayout,
    magic: Vec<u8>,
}

impl FrameEncoder {
    /// # Errors
    /// `FrameError::MagicWidthMismatch` if `magic` is not exactly `layout.magic_width()` bytes.
    pub fn new(layout: FrameLayout, magic: impl Into<Vec<u8>>) -> Result<Self, FrameError> {
        let magic = magic.into();
        if magic.len() != layout.magic_width() {
            return Err(FrameError::MagicWidthMismatch {
                expected: layout.magic_width(),
                actual: magic.len(),
            });
        }
        Ok(Self { layout, magic })
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Total frame size for a payload of `payload_len` bytes.
    pub fn frame_len(&self, payload_len: usize) -> usize {
        self.layout.overhead() + payload_len
    }

    /// Append a complete frame carrying `payload` to `out`, returning its size.
    ///
    /// # Errors
    /// `FrameError::FrameTooLarge` if the frame exceeds the layout's maximum
    /// size or what the length field can express. `out` is left untouched.
    pub fn encode_into(&self, payload: &[u8], out: &mut Vec<u8>) -> Result<usize, FrameError> {
        let size = self.frame_len(payload.len());
        let limit = (self.layout.max_frame_size() as u64).min(self.layout.length_width().max_value());
        if size as u64 > limit {
            return Err(FrameError::FrameTooLarge {
                size: size as u64,
                max: limit,
            });
        }

        let start = out.len();
        out.reserve(size);
        out.extend_from_slice(&self.magic);
        self.layout.length_width().encode(size as u64, out);
        out.extend_from_slice(payload);

        let crc = crc32(&out[start..]);
        out.extend_from_slice(&crc.to_le_bytes()[..self.layout.checksum_width()]);
        Ok(size)
    }

    /// Encode a frame into a fresh buffer.
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>, FrameError> {
        let mut out = Vec::with_capacity(self.frame_len(payload.len()));
        self.encode_into(payload, &mut out)?;
        Ok(out)
    }
}

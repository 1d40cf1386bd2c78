use crc32fast::Hasher;

/// Streaming CRC-32 (IEEE, zlib compatible) accumulated one byte at a time.
#[derive(Clone, Default)]
pub struct Crc32 {
    hasher: Hasher,
}

impl Crc32 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new sum, discarding anything accumulated so far.
    #[inline]
    pub fn reseed(&mut self) {
        self.hasher.reset();
    }

    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.hasher.update(&[byte]);
    }

    /// Current value of the sum. Does not consume the accumulator.
    #[inline]
    pub fn value(&self) -> u32 {
        self.hasher.clone().finalize()
    }
}

/// CRC-32 of a whole buffer.
pub fn crc32(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

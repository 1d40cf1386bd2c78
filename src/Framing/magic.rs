/// Decides whether the bytes accumulated so far can still be the start of a frame.
///
/// The parser calls this with every prefix of a candidate, from one byte up to
/// the configured magic width. Returning `false` abandons the candidate.
pub trait MagicMatcher {
    fn matches_prefix(&self, candidate: &[u8]) -> bool;
}

impl<F> MagicMatcher for F
where
    F: Fn(&[u8]) -> bool,
{
    #[inline]
    fn matches_prefix(&self, candidate: &[u8]) -> bool {
        self(candidate)
    }
}

/// Matches one fixed byte sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMagic {
    bytes: Vec<u8>,
}

impl FixedMagic {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> usize {
        self.bytes.len()
    }
}

impl MagicMatcher for FixedMagic {
    #[inline]
    fn matches_prefix(&self, candidate: &[u8]) -> bool {
        self.bytes.starts_with(candidate)
    }
}

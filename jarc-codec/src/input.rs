//! Padded input buffers
//!
//! SIMD tokenizers load full vectors and may read past the nominal end of
//! the input. [`PaddedInput`] owns the document bytes plus a guaranteed
//! tail of zero padding so such reads stay inside the allocation.

use jarc_format::constants::INPUT_PADDING;

/// Input bytes with at least [`INPUT_PADDING`] trailing padding bytes.
#[derive(Debug, Clone, Default)]
pub struct PaddedInput {
    buf: Vec<u8>,
    len: usize,
}

impl PaddedInput {
    /// Take ownership of `buf` and append the padding tail.
    pub fn new(mut buf: Vec<u8>) -> Self {
        let len = buf.len();
        buf.resize(len + INPUT_PADDING, 0);
        Self { buf, len }
    }

    /// The document bytes, without padding.
    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The document bytes followed by the padding tail.
    pub fn padded_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Length of the document region.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the document region is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl From<Vec<u8>> for PaddedInput {
    fn from(buf: Vec<u8>) -> Self {
        Self::new(buf)
    }
}

impl From<&[u8]> for PaddedInput {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<&str> for PaddedInput {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

//! Sizes and limits of the archive layout

/// Alignment of node and child-region boundaries, in bytes.
pub const ALIGNMENT: usize = 8;

/// Size of one archive word.
pub const WORD_BYTES: usize = 8;

/// Size of one node record (two words).
pub const NODE_BYTES: usize = 16;

/// Size of one object field record (property word + node).
pub const FIELD_BYTES: usize = 24;

/// Size of the per-document record header.
pub const HEADER_BYTES: usize = 8;

/// Maximum child count storable in a composite node's count field.
pub const MAX_COMPOSITE_CHILDREN: usize = 0xFF_FFFE;

/// Longest string encodable inline within a descriptor word.
pub const MAX_INLINE_STRING: usize = 8;

/// Longest string encodable with the length-with-flag scheme.
pub const MAX_STRING_BYTES: usize = (1 << 30) - 1;

/// Trailing input padding a SIMD tokenizer may overread.
pub const INPUT_PADDING: usize = 64;

//! Error types for jarc archives

use thiserror::Error;

/// jarc error types
#[derive(Debug, Error)]
pub enum JarcError {
    /// The tokenizer rejected the input JSON.
    #[error("malformed JSON at input byte {offset}: {message}")]
    Tokenizer {
        /// Byte offset of the failure within the transcoded input.
        offset: usize,
        /// The tokenizer's own diagnostic.
        message: String,
    },
    /// A document was not followed by a newline.
    #[error("document ending at input byte {offset} is not terminated by a newline")]
    MalformedFraming {
        /// Byte offset one past the document's last consumed byte.
        offset: usize,
    },
    /// Bytes remained after the last complete document.
    #[error("{remainder} trailing bytes did not form a complete document")]
    TrailingGarbage {
        /// Count of unconsumed tail bytes.
        remainder: usize,
    },
    /// An array or object exceeds the representable child count.
    #[error("composite value has {count} children, exceeding the storable maximum")]
    CompositeTooLarge {
        /// Observed child count.
        count: usize,
    },
    /// A string exceeds the maximum encodable byte length.
    #[error("string of {len} bytes exceeds the maximum encodable length")]
    StringTooLarge {
        /// Observed string byte length.
        len: usize,
    },
    /// Archives are little-endian only; construction is refused elsewhere.
    #[error("refusing to build archives on a big-endian host")]
    NonLittleEndianHost,
    /// An archive violated the wire layout while being read.
    #[error("corrupt archive: {0}")]
    CorruptArchive(String),
    /// A node carried the reserved or an unknown tag byte.
    #[error("reserved node tag {0:#04x}")]
    ReservedTag(u8),
    /// An archive ended before a complete record or node.
    #[error("unexpected end of archive")]
    UnexpectedEof,
    /// I/O failure in a streaming surface.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JarcError>;

//! jarc Codec - Streaming JSON-to-archive transcoder
//!
//! This crate drives newline-delimited JSON documents through a streaming
//! tokenizer and emits, per document, a self-contained binary archive that
//! can be read in place. It includes:
//!
//! - Padded input buffers for SIMD-friendly tokenizers
//! - A tokenizer cursor producing typed DOM elements per document
//! - Depth-first node emission with children-before-parent placement
//! - Scratch buffer pooling for arbitrary-depth recursion
//! - Document framing with per-record headers
//! - An alternate heap-tree build path through an arena allocator

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod heap;
pub mod input;
pub mod parser;
pub mod scratch;
pub mod stream;

mod transcode;

// Re-export commonly used types
pub use bumpalo::Bump;
pub use heap::{sort_heap_fields, HeapField, HeapNode};
pub use input::PaddedInput;
pub use jarc_format::{JarcError, Result};
pub use parser::Parser;
pub use stream::{DocumentCursor, Element};

//! jarc Format - Wire-layout primitives for jarc archives
//!
//! This crate defines the on-disk layout of jarc archives with no I/O
//! dependencies. It includes:
//!
//! - 64-bit little-endian words and 16/24-byte node/field records
//! - Node tag codes
//! - Inline and indirect string descriptor coding
//! - Per-document record headers and record iteration
//! - Zero-copy views for reading archives in place
//! - Error types and layout limits

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod node;
pub mod record;
pub mod strings;
pub mod types;
pub mod view;
pub mod word;

// Re-export commonly used types
pub use error::{JarcError, Result};
pub use node::{ArchivedField, ArchivedNode};
pub use record::{records, DocumentHeader, RecordIter};
pub use types::NodeTag;
pub use view::{ArrayRef, DocumentView, FieldRef, NodeRef, ObjectRef, ValueRef};
pub use word::Word;

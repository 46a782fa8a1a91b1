//! Parser handle and document framing
//!
//! A [`Parser`] owns the scratch pool and tokenizer sizing hint and is
//! reused across calls; it is not shared between threads. Each transcoded
//! document becomes one record: an 8-byte header patched in after the body
//! is complete, then the body with the root node as its final 16 bytes.

use crate::buffer::ArchiveBuf;
use crate::heap::{self, HeapNode};
use crate::input::PaddedInput;
use crate::scratch::ScratchPool;
use crate::stream::{DocumentCursor, Element};
use crate::transcode::{place_array, transcode_node};
use bumpalo::Bump;
use jarc_format::{DocumentHeader, JarcError, Result, Word};

/// Streaming parser over newline-delimited JSON documents.
pub struct Parser {
    pool: ScratchPool,
    capacity: usize,
}

impl Parser {
    /// Create a parser with the given tokenizer capacity hint (the largest
    /// single document the caller expects to feed it).
    pub fn new(capacity: usize) -> Result<Self> {
        if cfg!(target_endian = "big") {
            return Err(JarcError::NonLittleEndianHost);
        }
        Ok(Self { pool: ScratchPool::new(), capacity })
    }

    /// The capacity hint this parser was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Transcode every complete document in `input`, appending one record
    /// per document to `output`.
    ///
    /// On failure the output is truncated to the start of the failing
    /// document's record; records already appended remain valid.
    pub fn transcode(&mut self, input: &PaddedInput, output: &mut Vec<u8>) -> Result<()> {
        debug_assert_eq!(output.len() % 8, 0, "output must stay 8-byte aligned");
        let bytes = input.bytes();
        let mut cursor = DocumentCursor::new(bytes);

        while let Some(element) = cursor.next_document()? {
            let record_start = output.len();
            if let Err(err) = self.transcode_document(&element, &cursor, bytes, output) {
                output.truncate(record_start);
                return Err(err);
            }
        }
        if cursor.truncated_bytes() != 0 && !bytes.is_empty() {
            return Err(JarcError::TrailingGarbage { remainder: cursor.truncated_bytes() });
        }
        Ok(())
    }

    fn transcode_document(
        &mut self,
        element: &Element,
        cursor: &DocumentCursor<'_>,
        input: &[u8],
        output: &mut Vec<u8>,
    ) -> Result<()> {
        let mut buf = ArchiveBuf::new(output);
        let header_at = buf.len();
        buf.push_word(Word(0));
        let body_start = buf.len();

        let (root, _tape) = transcode_node(&mut buf, &mut self.pool, element)?;
        // Wrap the root in a one-element placement so the record always
        // ends with a canonical, resolved root node.
        place_array(&mut buf, &mut [root], 0);

        let end = cursor.current_index();
        if end == 0 || input[end - 1] != b'\n' {
            return Err(JarcError::MalformedFraming { offset: end });
        }

        let header = DocumentHeader {
            end_input_offset: end as u32,
            body_length: (buf.len() - body_start) as u32,
        };
        buf.patch_word(header_at, header.word());
        Ok(())
    }

    /// Build heap trees for every complete document in `input`, allocating
    /// from `alloc`. Each document yields `(root, end_input_offset)` where
    /// the offset is `offset` plus the bytes consumed through that
    /// document's newline.
    pub fn parse<'a>(
        &mut self,
        input: &PaddedInput,
        offset: i64,
        alloc: &'a Bump,
    ) -> Result<Vec<(HeapNode<'a>, i64)>> {
        let bytes = input.bytes();
        let mut cursor = DocumentCursor::new(bytes);
        let mut documents = Vec::new();

        while let Some(element) = cursor.next_document()? {
            let root = heap::build_node(alloc, &element)?;
            let end = cursor.current_index();
            if end == 0 || bytes[end - 1] != b'\n' {
                return Err(JarcError::MalformedFraming { offset: end });
            }
            documents.push((root, offset + end as i64));
        }
        if cursor.truncated_bytes() != 0 && !bytes.is_empty() {
            return Err(JarcError::TrailingGarbage { remainder: cursor.truncated_bytes() });
        }
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_newline_is_framing_error() {
        let mut parser = Parser::new(1024).unwrap();
        let mut output = Vec::new();
        let err = parser.transcode(&PaddedInput::from("42"), &mut output).unwrap_err();
        assert!(matches!(err, JarcError::MalformedFraming { offset: 2 }));
        assert!(output.is_empty());
    }

    #[test]
    fn test_error_truncates_to_failing_record() {
        let mut parser = Parser::new(1024).unwrap();
        let mut output = Vec::new();
        let err = parser.transcode(&PaddedInput::from("1\n2"), &mut output).unwrap_err();
        assert!(matches!(err, JarcError::MalformedFraming { .. }));
        // The first document's record survives intact.
        assert_eq!(output.len(), 24);
        assert_eq!(&output[..8], &[2, 0, 0, 0, 16, 0, 0, 0]);
    }

    #[test]
    fn test_empty_input_is_ok() {
        let mut parser = Parser::new(1024).unwrap();
        let mut output = Vec::new();
        parser.transcode(&PaddedInput::new(Vec::new()), &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_partial_document_is_trailing_garbage() {
        let mut parser = Parser::new(1024).unwrap();
        let mut output = Vec::new();
        let err = parser
            .transcode(&PaddedInput::from("42\n{\"a\":"), &mut output)
            .unwrap_err();
        assert!(matches!(err, JarcError::TrailingGarbage { remainder: 5 }));
        // The complete first document was already emitted.
        assert_eq!(output.len(), 24);
    }

    #[test]
    fn test_parse_reports_offsets_from_base() {
        let mut parser = Parser::new(1024).unwrap();
        let alloc = Bump::new();
        let documents = parser
            .parse(&PaddedInput::from("true\n[1]\n"), 100, &alloc)
            .unwrap();
        assert_eq!(documents.len(), 2);
        assert!(matches!(documents[0].0, HeapNode::Bool(true)));
        assert_eq!(documents[0].1, 105);
        assert_eq!(documents[1].1, 109);
    }
}

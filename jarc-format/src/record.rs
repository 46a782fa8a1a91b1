//! Per-document record framing
//!
//! A transcoded output is a concatenation of records, each an 8-byte header
//! word followed by a self-contained, 8-byte-aligned body whose final 16
//! bytes are the document's root node.

use crate::constants::{ALIGNMENT, HEADER_BYTES, NODE_BYTES};
use crate::error::{JarcError, Result};
use crate::word::Word;

/// A document record header word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentHeader {
    /// Input byte offset one past this document's terminating newline.
    pub end_input_offset: u32,
    /// Byte length of the archive body following the header.
    pub body_length: u32,
}

impl DocumentHeader {
    /// View as a single archive word.
    pub fn word(self) -> Word {
        Word::from_parts(self.end_input_offset, self.body_length)
    }

    /// Encode to bytes.
    pub fn encode(self) -> [u8; 8] {
        self.word().to_le_bytes()
    }

    /// Decode from the first 8 bytes of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_BYTES {
            return Err(JarcError::UnexpectedEof);
        }
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[..HEADER_BYTES]);
        let word = Word::from_le_bytes(raw);
        Ok(Self { end_input_offset: word.lo(), body_length: word.hi() })
    }
}

/// Iterate the `(header, body)` records of a concatenated archive.
pub fn records(archive: &[u8]) -> RecordIter<'_> {
    RecordIter { rest: archive }
}

/// Iterator over document records; fuses after the first error.
#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Result<(DocumentHeader, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let header = match DocumentHeader::decode(self.rest) {
            Ok(header) => header,
            Err(err) => {
                self.rest = &[];
                return Some(Err(err));
            }
        };
        let body_len = header.body_length as usize;
        if body_len < NODE_BYTES || body_len % ALIGNMENT != 0 {
            self.rest = &[];
            return Some(Err(JarcError::CorruptArchive(format!(
                "record body length {body_len} is not a positive multiple of {ALIGNMENT}"
            ))));
        }
        if self.rest.len() < HEADER_BYTES + body_len {
            self.rest = &[];
            return Some(Err(JarcError::UnexpectedEof));
        }
        let body = &self.rest[HEADER_BYTES..HEADER_BYTES + body_len];
        self.rest = &self.rest[HEADER_BYTES + body_len..];
        Some(Ok((header, body)))
    }
}

/// Add `base` to every record's `end_input_offset`, re-absolutizing headers
/// produced from an input chunk that began at `base`.
pub fn rebase_input_offsets(archive: &mut [u8], base: u32) -> Result<()> {
    let mut at = 0;
    while at < archive.len() {
        let mut header = DocumentHeader::decode(&archive[at..])?;
        let advance = HEADER_BYTES + header.body_length as usize;
        if archive.len() - at < advance {
            return Err(JarcError::UnexpectedEof);
        }
        header.end_input_offset = header.end_input_offset.wrapping_add(base);
        archive[at..at + HEADER_BYTES].copy_from_slice(&header.encode());
        at += advance;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(end: u32, body: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&DocumentHeader { end_input_offset: end, body_length: body.len() as u32 }.encode());
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn test_header_roundtrip() {
        let header = DocumentHeader { end_input_offset: 5, body_length: 16 };
        assert_eq!(header.encode(), [5, 0, 0, 0, 16, 0, 0, 0]);
        assert_eq!(DocumentHeader::decode(&header.encode()).unwrap(), header);
    }

    #[test]
    fn test_record_iteration() {
        let mut archive = record(5, &[1u8; 16]);
        archive.extend_from_slice(&record(11, &[2u8; 32]));

        let recs: Vec<_> = records(&archive).collect::<Result<_>>().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].0.end_input_offset, 5);
        assert_eq!(recs[0].1, &[1u8; 16]);
        assert_eq!(recs[1].0.body_length, 32);
    }

    #[test]
    fn test_record_iteration_truncated() {
        let mut archive = record(5, &[1u8; 16]);
        archive.truncate(archive.len() - 1);
        let mut iter = records(&archive);
        assert!(matches!(iter.next(), Some(Err(JarcError::UnexpectedEof))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_record_iteration_bad_body_length() {
        let archive = record(5, &[1u8; 12]);
        let mut iter = records(&archive);
        assert!(matches!(iter.next(), Some(Err(JarcError::CorruptArchive(_)))));
    }

    #[test]
    fn test_rebase() {
        let mut archive = record(3, &[0u8; 16]);
        archive.extend_from_slice(&record(7, &[0u8; 16]));
        rebase_input_offsets(&mut archive, 100).unwrap();

        let recs: Vec<_> = records(&archive).collect::<Result<_>>().unwrap();
        assert_eq!(recs[0].0.end_input_offset, 103);
        assert_eq!(recs[1].0.end_input_offset, 107);
    }
}

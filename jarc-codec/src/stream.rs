//! Streaming tokenizer cursor
//!
//! The transcoder treats its tokenizer as a black box that yields one typed
//! DOM element per newline-delimited document and reports how far into the
//! input it has advanced. [`DocumentCursor`] realizes that contract over
//! `serde_json`'s streaming deserializer.

use jarc_format::{JarcError, Result};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::de::SliceRead;
use serde_json::StreamDeserializer;
use std::fmt;

/// A typed DOM element for one JSON document.
///
/// The eight variants are a closed set; object fields are kept as a vector
/// of pairs so source order and duplicate keys survive tokenization.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Ordered child elements.
    Array(Vec<Element>),
    /// Boolean.
    Bool(bool),
    /// 64-bit float.
    F64(f64),
    /// Signed integer (produced for negative literals).
    I64(i64),
    /// Null.
    Null,
    /// Ordered `(key, value)` pairs in source order, duplicates included.
    Object(Vec<(String, Element)>),
    /// UTF-8 string.
    String(String),
    /// Unsigned integer (produced for non-negative literals).
    U64(u64),
}

struct ElementVisitor;

impl<'de> Visitor<'de> for ElementVisitor {
    type Value = Element;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, val: bool) -> std::result::Result<Element, E> {
        Ok(Element::Bool(val))
    }

    fn visit_i64<E: de::Error>(self, val: i64) -> std::result::Result<Element, E> {
        Ok(Element::I64(val))
    }

    fn visit_u64<E: de::Error>(self, val: u64) -> std::result::Result<Element, E> {
        Ok(Element::U64(val))
    }

    fn visit_f64<E: de::Error>(self, val: f64) -> std::result::Result<Element, E> {
        Ok(Element::F64(val))
    }

    fn visit_str<E: de::Error>(self, val: &str) -> std::result::Result<Element, E> {
        Ok(Element::String(val.to_owned()))
    }

    fn visit_string<E: de::Error>(self, val: String) -> std::result::Result<Element, E> {
        Ok(Element::String(val))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Element, E> {
        Ok(Element::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Element, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Element::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Element, A::Error> {
        let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value()?;
            fields.push((key, value));
        }
        Ok(Element::Object(fields))
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ElementVisitor)
    }
}

/// Cursor over the documents of a newline-delimited JSON input.
///
/// After each yielded document, [`current_index`](Self::current_index)
/// reports the bytes consumed so far (one past the document's trailing
/// whitespace run, i.e. the start of the next document or the end of
/// input). [`truncated_bytes`](Self::truncated_bytes) reports tail bytes
/// that never formed a complete document.
pub struct DocumentCursor<'a> {
    input: &'a [u8],
    stream: StreamDeserializer<'a, SliceRead<'a>, Element>,
    index: usize,
    truncated: usize,
    done: bool,
}

impl<'a> DocumentCursor<'a> {
    /// Open a cursor over `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            stream: serde_json::Deserializer::from_slice(input).into_iter(),
            index: 0,
            truncated: 0,
            done: false,
        }
    }

    /// Advance to the next complete document, or `None` at end of stream.
    pub fn next_document(&mut self) -> Result<Option<Element>> {
        if self.done {
            return Ok(None);
        }
        match self.stream.next() {
            Some(Ok(element)) => {
                let mut index = self.stream.byte_offset();
                while index < self.input.len()
                    && matches!(self.input[index], b' ' | b'\t' | b'\n' | b'\r')
                {
                    index += 1;
                }
                self.index = index;
                Ok(Some(element))
            }
            Some(Err(err)) if err.is_eof() => {
                // An incomplete final document; its bytes were never consumed.
                self.done = true;
                self.truncated = self.input.len() - self.index;
                Ok(None)
            }
            Some(Err(err)) => {
                self.done = true;
                Err(JarcError::Tokenizer {
                    offset: error_offset(self.input, &err),
                    message: err.to_string(),
                })
            }
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }

    /// Input bytes consumed so far.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Tail bytes that did not form a complete document.
    pub fn truncated_bytes(&self) -> usize {
        self.truncated
    }
}

/// Translate the tokenizer's line/column diagnostics into a byte offset.
fn error_offset(input: &[u8], err: &serde_json::Error) -> usize {
    let line = err.line();
    if line == 0 {
        return 0;
    }
    let mut start = 0;
    let mut remaining = line - 1;
    for (i, &byte) in input.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if byte == b'\n' {
            remaining -= 1;
            start = i + 1;
        }
    }
    (start + err.column().saturating_sub(1)).min(input.len())
}

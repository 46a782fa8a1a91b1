//! jarc I/O - Streaming surfaces over the transcoder
//!
//! This crate adapts the codec to `Read`/`Write` endpoints:
//!
//! - Chunked transcoding of newline-delimited JSON streams
//! - Record-at-a-time unpacking of archives back to NDJSON
//! - Parallel transcoding across document boundaries

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod parallel;

use jarc_codec::{PaddedInput, Parser};
use jarc_format::record::rebase_input_offsets;
use jarc_format::{records, DocumentHeader, DocumentView, JarcError, NodeRef, Result, ValueRef};
use serde_json::{Map, Number, Value};
use std::io::{Read, Write};

/// Options for streaming transcodes.
#[derive(Debug, Clone)]
pub struct TranscodeOptions {
    /// Tokenizer capacity hint handed to the parser.
    pub capacity: usize,
    /// Target read size per chunk; documents always stay whole.
    pub chunk_bytes: usize,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self { capacity: 1 << 20, chunk_bytes: 1 << 20 }
    }
}

/// Summary of a completed streaming transcode.
#[derive(Debug, Default, Clone, Copy)]
pub struct TranscodeSummary {
    /// Documents transcoded.
    pub documents: u64,
    /// Input bytes consumed.
    pub input_bytes: u64,
    /// Archive bytes written.
    pub output_bytes: u64,
}

/// Transcode a newline-delimited JSON stream into concatenated archive
/// records.
///
/// Input is read in chunks and cut at the last newline of each chunk; the
/// partial tail carries into the next read. Record headers are rebased as
/// chunks advance, so the output is byte-identical to a single-call
/// transcode of the whole stream.
pub fn transcode<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    opts: &TranscodeOptions,
) -> Result<TranscodeSummary> {
    let mut parser = Parser::new(opts.capacity)?;
    let mut summary = TranscodeSummary::default();
    let mut carry: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; opts.chunk_bytes.max(1)];
    let mut archive: Vec<u8> = Vec::new();
    let mut consumed: u64 = 0;

    loop {
        let read = input.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        summary.input_bytes += read as u64;
        carry.extend_from_slice(&chunk[..read]);

        // Hold back everything after the last newline; it belongs to the
        // next chunk.
        let Some(split) = carry.iter().rposition(|&b| b == b'\n') else {
            continue;
        };
        let complete: Vec<u8> = carry.drain(..=split).collect();
        consumed = flush_documents(
            &mut parser,
            complete,
            consumed,
            &mut archive,
            &mut output,
            &mut summary,
        )?;
    }

    if !carry.is_empty() {
        // The stream ended mid-document; let the parser surface the
        // framing failure.
        let tail = std::mem::take(&mut carry);
        flush_documents(&mut parser, tail, consumed, &mut archive, &mut output, &mut summary)?;
    }
    Ok(summary)
}

fn flush_documents<W: Write>(
    parser: &mut Parser,
    bytes: Vec<u8>,
    consumed: u64,
    archive: &mut Vec<u8>,
    output: &mut W,
    summary: &mut TranscodeSummary,
) -> Result<u64> {
    let chunk_len = bytes.len() as u64;
    archive.clear();
    parser.transcode(&PaddedInput::new(bytes), archive)?;
    rebase_input_offsets(archive, consumed as u32)?;

    summary.documents += records(archive).count() as u64;
    summary.output_bytes += archive.len() as u64;
    output.write_all(archive)?;
    Ok(consumed + chunk_len)
}

/// Summary of a completed archive unpack.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnpackSummary {
    /// Documents written.
    pub documents: u64,
    /// Archive bytes read.
    pub input_bytes: u64,
}

/// Unpack concatenated archive records back into newline-delimited JSON.
///
/// Records are processed one at a time; only a single record body is held
/// in memory.
pub fn unpack<R: Read, W: Write>(mut input: R, mut output: W) -> Result<UnpackSummary> {
    let mut summary = UnpackSummary::default();
    let mut header = [0u8; 8];

    while read_header(&mut input, &mut header)? {
        let header = DocumentHeader::decode(&header)?;
        let mut body = vec![0u8; header.body_length as usize];
        input.read_exact(&mut body).map_err(eof_as_archive_error)?;

        let view = DocumentView::new(&body)?;
        let value = to_json(view.root())?;
        serde_json::to_writer(&mut output, &value)
            .map_err(|err| JarcError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
        output.write_all(b"\n")?;

        summary.documents += 1;
        summary.input_bytes += 8 + body.len() as u64;
    }
    Ok(summary)
}

/// Fill the 8-byte header buffer; `Ok(false)` on a clean end of stream.
fn read_header<R: Read>(input: &mut R, buf: &mut [u8; 8]) -> Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        let read = input.read(&mut buf[filled..])?;
        if read == 0 {
            return if filled == 0 { Ok(false) } else { Err(JarcError::UnexpectedEof) };
        }
        filled += read;
    }
    Ok(true)
}

fn eof_as_archive_error(err: std::io::Error) -> JarcError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        JarcError::UnexpectedEof
    } else {
        JarcError::Io(err)
    }
}

/// Convert an archived node back into a `serde_json` value.
///
/// Object keys come out in archive (sorted) order; duplicate keys collapse
/// to the last occurrence, as JSON maps require.
pub fn to_json(node: NodeRef<'_>) -> Result<Value> {
    Ok(match node.value()? {
        ValueRef::Null => Value::Null,
        ValueRef::Bool(val) => Value::Bool(val),
        ValueRef::Float(val) => Number::from_f64(val).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::NegInt(val) => Value::Number(Number::from(val)),
        ValueRef::PosInt(val) => Value::Number(Number::from(val)),
        ValueRef::Str(val) => Value::String(val.to_owned()),
        ValueRef::Array(arr) => {
            let mut items = Vec::with_capacity(arr.len());
            for child in arr.iter() {
                items.push(to_json(child)?);
            }
            Value::Array(items)
        }
        ValueRef::Object(obj) => {
            let mut map = Map::new();
            for field in obj.iter() {
                map.insert(field.key()?.to_owned(), to_json(field.value())?);
            }
            Value::Object(map)
        }
    })
}

//! Parallel transcoding support
//!
//! Records are self-contained, so an input can be split at document
//! boundaries, transcoded by one parser per rayon worker, and concatenated.
//! Each part's headers are rebased to the chunk's input position, making
//! the result byte-identical to a sequential transcode.

use jarc_codec::{PaddedInput, Parser};
use jarc_format::record::rebase_input_offsets;
use jarc_format::Result;
use rayon::prelude::*;

/// Transcode `input` across the rayon thread pool.
pub fn transcode_parallel(input: &[u8], capacity: usize) -> Result<Vec<u8>> {
    let chunks = split_at_documents(input, rayon::current_num_threads().max(1));

    let parts: Vec<Vec<u8>> = chunks
        .into_par_iter()
        .map(|chunk| {
            let mut parser = Parser::new(capacity)?;
            let mut archive = Vec::new();
            parser.transcode(&PaddedInput::from(chunk.bytes), &mut archive)?;
            rebase_input_offsets(&mut archive, chunk.base as u32)?;
            Ok(archive)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut output = Vec::with_capacity(parts.iter().map(Vec::len).sum());
    for part in parts {
        output.extend_from_slice(&part);
    }
    Ok(output)
}

struct Chunk<'a> {
    base: usize,
    bytes: &'a [u8],
}

/// Split `input` into roughly `pieces` chunks, cutting only just past a
/// newline so every chunk holds whole documents. A trailing piece without a
/// newline is kept so its framing failure surfaces from the transcode.
fn split_at_documents(input: &[u8], pieces: usize) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let target = (input.len() / pieces.max(1)).max(1);
    let mut start = 0;

    while start < input.len() {
        let mut end = (start + target).min(input.len());
        if end < input.len() {
            end = match input[end..].iter().position(|&b| b == b'\n') {
                Some(found) => end + found + 1,
                None => input.len(),
            };
        }
        chunks.push(Chunk { base: start, bytes: &input[start..end] });
        start = end;
    }
    chunks
}

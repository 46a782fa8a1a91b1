//! Integration tests for the streaming surfaces

use jarc_codec::{JarcError, PaddedInput, Parser};
use jarc_io::{transcode, unpack, TranscodeOptions};
use serde_json::Value;
use std::fs;
use std::io::Cursor;

fn sample_input(docs: usize) -> String {
    let mut input = String::new();
    for i in 0..docs {
        input.push_str(&format!(
            "{{\"seq\":{i},\"flag\":{},\"note\":\"entry number {i} with some length to it\",\"vals\":[{i},{},null]}}\n",
            i % 2 == 0,
            i * 2,
        ));
    }
    input
}

fn one_shot(input: &str) -> Vec<u8> {
    let mut parser = Parser::new(1 << 16).unwrap();
    let mut archive = Vec::new();
    parser.transcode(&PaddedInput::from(input), &mut archive).unwrap();
    archive
}

#[test]
fn streaming_matches_one_shot_across_chunk_sizes() {
    let input = sample_input(50);
    let expected = one_shot(&input);

    for chunk_bytes in [7, 64, 1024, 1 << 20] {
        let opts = TranscodeOptions { capacity: 1 << 16, chunk_bytes };
        let mut streamed = Vec::new();
        let summary = transcode(Cursor::new(input.as_bytes()), &mut streamed, &opts).unwrap();

        assert_eq!(streamed, expected, "chunk_bytes={chunk_bytes}");
        assert_eq!(summary.documents, 50);
        assert_eq!(summary.input_bytes, input.len() as u64);
        assert_eq!(summary.output_bytes, expected.len() as u64);
    }
}

#[test]
fn unpack_round_trips_documents() {
    let input = sample_input(20);
    let archive = one_shot(&input);

    let mut ndjson = Vec::new();
    let summary = unpack(Cursor::new(&archive), &mut ndjson).unwrap();
    assert_eq!(summary.documents, 20);

    let original: Vec<Value> = input
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let decoded: Vec<Value> = String::from_utf8(ndjson)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(decoded, original);
}

#[test]
fn unpack_rejects_truncated_archives() {
    let archive = one_shot("true\n");
    let truncated = &archive[..archive.len() - 4];
    let err = unpack(Cursor::new(truncated), &mut Vec::new()).unwrap_err();
    assert!(matches!(err, JarcError::UnexpectedEof));
}

#[test]
fn mid_stream_tokenizer_error_propagates() {
    let input = "{\"good\":1}\nnot json\n";
    let opts = TranscodeOptions::default();
    let err = transcode(Cursor::new(input.as_bytes()), &mut Vec::new(), &opts).unwrap_err();
    assert!(matches!(err, JarcError::Tokenizer { .. }));
}

#[test]
fn stream_ending_mid_document_fails_framing() {
    let input = "{\"good\":1}\n{\"partial\":";
    let opts = TranscodeOptions::default();
    let mut output = Vec::new();
    let err = transcode(Cursor::new(input.as_bytes()), &mut output, &opts).unwrap_err();
    assert!(matches!(
        err,
        JarcError::TrailingGarbage { .. } | JarcError::MalformedFraming { .. }
    ));
    // The complete leading document was still emitted.
    assert!(!output.is_empty());
}

#[test]
fn empty_stream_produces_empty_archive() {
    let opts = TranscodeOptions::default();
    let mut output = Vec::new();
    let summary = transcode(Cursor::new(&[][..]), &mut output, &opts).unwrap();
    assert_eq!(summary.documents, 0);
    assert!(output.is_empty());
}

#[test]
fn file_round_trip_through_tempdir() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.ndjson");
    let archive_path = dir.path().join("output.jarc");

    let input = sample_input(10);
    fs::write(&input_path, &input).unwrap();

    let opts = TranscodeOptions::default();
    let summary = transcode(
        fs::File::open(&input_path).unwrap(),
        fs::File::create(&archive_path).unwrap(),
        &opts,
    )
    .unwrap();
    assert_eq!(summary.documents, 10);

    let mut ndjson = Vec::new();
    unpack(fs::File::open(&archive_path).unwrap(), &mut ndjson).unwrap();
    let round_tripped: Vec<Value> = String::from_utf8(ndjson)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let original: Vec<Value> = input
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(round_tripped, original);
}

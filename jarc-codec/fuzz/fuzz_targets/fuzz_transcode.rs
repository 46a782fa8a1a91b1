#![no_main]

use jarc_codec::{PaddedInput, Parser};
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must either transcode or fail cleanly; no panics, and the
// output must stay record-aligned.
fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::new(1 << 16).unwrap();
    let mut output = Vec::new();
    let _ = parser.transcode(&PaddedInput::from(data), &mut output);
    assert_eq!(output.len() % 8, 0);
});

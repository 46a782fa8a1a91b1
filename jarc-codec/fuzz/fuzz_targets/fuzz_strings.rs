#![no_main]

use jarc_format::strings::{decode_length, encode_length, inline_len, inline_word, is_indirect};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if text.len() <= 8 {
            let word = inline_word(text.as_bytes());
            assert_eq!(inline_len(word), text.len());
            assert!(!is_indirect(word.to_le_bytes()[0]));
        } else if text.len() < (1 << 30) {
            let encoded = encode_length(text.len() as u32);
            assert!(is_indirect(encoded as u8));
            assert_eq!(decode_length(encoded), text.len() as u32);
        }
    }
});

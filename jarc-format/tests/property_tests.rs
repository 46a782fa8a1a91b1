//! Property-based tests for jarc format primitives

use jarc_format::constants::MAX_STRING_BYTES;
use jarc_format::node::ArchivedNode;
use jarc_format::record::DocumentHeader;
use jarc_format::strings::{
    decode_length, encode_length, inline_len, inline_word, is_indirect,
};
use jarc_format::word::Word;
use proptest::prelude::*;

proptest! {
    #[test]
    fn inline_word_roundtrip_property(s in "\\PC{0,8}") {
        prop_assume!(s.len() <= 8);
        let word = inline_word(s.as_bytes());
        prop_assert_eq!(inline_len(word), s.len());
        prop_assert_eq!(&word.to_le_bytes()[..s.len()], s.as_bytes());
        // Everything past the data is 0xFF padding.
        for &byte in &word.to_le_bytes()[s.len()..] {
            prop_assert_eq!(byte, 0xFF);
        }
    }

    #[test]
    fn length_encoding_roundtrip_property(len in 0u32..=MAX_STRING_BYTES as u32) {
        let encoded = encode_length(len);
        prop_assert_eq!(decode_length(encoded), len);
        // The marker byte is always 10xxxxxx.
        prop_assert_eq!(encoded as u8 & 0xC0, 0x80);
    }

    #[test]
    fn string_form_discrimination_property(s in "\\PC{0,8}") {
        prop_assume!(s.len() <= 8);
        // An inline descriptor's first byte never collides with the
        // indirect marker, for any UTF-8 content including empty.
        let word = inline_word(s.as_bytes());
        let first = word.to_le_bytes()[0];
        prop_assert!(!is_indirect(first));
    }

    #[test]
    fn word_parts_roundtrip_property(lo in any::<u32>(), hi in any::<u32>()) {
        let word = Word::from_parts(lo, hi);
        prop_assert_eq!(word.lo(), lo);
        prop_assert_eq!(word.hi(), hi);
        prop_assert_eq!(Word::from_le_bytes(word.to_le_bytes()), word);
    }

    #[test]
    fn node_bytes_roundtrip_property(w1 in any::<u64>(), w2 in any::<u64>()) {
        let node = ArchivedNode { w1: Word(w1), w2: Word(w2) };
        prop_assert_eq!(ArchivedNode::from_bytes(node.to_bytes()), node);
    }

    #[test]
    fn header_word_roundtrip_property(end in any::<u32>(), len in any::<u32>()) {
        let header = DocumentHeader { end_input_offset: end, body_length: len };
        prop_assert_eq!(DocumentHeader::decode(&header.encode()).unwrap(), header);
    }
}

#![no_main]

use jarc_codec::{PaddedInput, Parser};
use jarc_format::{records, DocumentView, NodeRef, ValueRef};
use libfuzzer_sys::fuzz_target;

fn walk(node: NodeRef<'_>) {
    match node.value() {
        Ok(ValueRef::Array(arr)) => arr.iter().for_each(walk),
        Ok(ValueRef::Object(obj)) => obj.iter().for_each(|field| {
            let _ = field.key();
            walk(field.value());
        }),
        _ => {}
    }
}

// Every archive the transcoder emits must be fully walkable in place.
fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::new(1 << 16).unwrap();
    let mut output = Vec::new();
    if parser.transcode(&PaddedInput::from(data), &mut output).is_ok() {
        for record in records(&output) {
            let (_, body) = record.expect("emitted records iterate");
            let view = DocumentView::new(body).expect("emitted bodies are views");
            walk(view.root());
        }
    }
});

use alloc::{format, string::String, vec::Vec};

use crate::{JsonParser, OnEvent, ParseEvent, ParserOptions, Result, Tokenizer, Value};

/// Splits `bytes` into consecutive chunks using `splits` as size hints. Every
/// chunk is non-empty and the chunks cover the input exactly.
pub fn chunks<'a>(bytes: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut out = Vec::new();
    let mut rest = bytes;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let size = 1 + (s % rest.len());
        let (head, tail) = rest.split_at(size);
        out.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

/// Parses `chunks` with a keep-everything parser.
pub fn parse_chunks(options: ParserOptions, chunks: &[&[u8]]) -> Result<Vec<Value>> {
    let mut parser = JsonParser::with_options(options, crate::KeepAll);
    for chunk in chunks {
        parser.parse(chunk)?;
    }
    parser.complete_all(b"")
}

/// Records every tokenizer event as its `Debug` rendering.
pub fn record_events(input: &[u8]) -> (Vec<String>, Result<()>) {
    let mut events = Vec::new();
    let result = {
        let mut tokenizer = Tokenizer::new(OnEvent(|event: ParseEvent<'_>| -> Result<()> {
            events.push(format!("{event:?}"));
            Ok(())
        }));
        tokenizer.finish(input)
    };
    (events, result)
}

/// Parses `text` with `serde_json` into our [`Value`].
pub fn oracle(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

//! Reacts to a moderation verdict while a tool-call response is still
//! streaming in.
//!
//! The assistant's response is a JSON object whose `moderation` member comes
//! first:
//!
//! ```text
//! {
//!   "moderation": { "decision": "allow" | "block", "reason": string | null },
//!   "filename":   string,
//!   "code":       string,
//!   "trace":      object
//! }
//! ```
//!
//! The filter below does two things as the chunks arrive:
//!
//! 1. When `moderation.decision` is `"block"` it fails the parse, so the
//!    caller stops reading the stream before the code snippet arrives.
//! 2. It drops the bulky `trace` member without ever building it.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonprune --example moderated_tool_call
//! ```

#![allow(clippy::needless_raw_string_hashes)]

use jsonprune::{Action, Error, ErrorCode, EventKind, JsonParser, Result, Value};

const ALLOWED: [&str; 6] = [
    r#"{"moderation":{"decision":"al"#,
    r#"low","reason":null},"#,
    r#""filename":"example.rs","code":"fn main() {\n"#,
    r#"    println!(\"hello\");\n}\n","#,
    r#""trace":{"spans":[{"name":"sample","ms":12},{"name":"detok","#,
    r#""ms":3}]}}"#,
];

const BLOCKED: [&str; 3] = [
    r#"{"moderation":{"decision":"blo"#,
    r#"ck","reason":"policy"},"#,
    r#""filename":"never-read.rs","code":"…"}"#,
];

/// Feeds `stream` chunk by chunk, returning the pruned response or the reason
/// the stream was abandoned.
fn process(stream: &[&str]) -> Result<Value> {
    let mut last_key = String::new();
    let mut parser = JsonParser::with_filter(|depth: usize, kind: EventKind, value: &mut Value| -> Result<Action> {
        match kind {
            EventKind::MapKey => {
                if depth == 1 && value.as_str() == Some("trace") {
                    return Ok(Action::Discard);
                }
                last_key = value.as_str().unwrap_or_default().to_owned();
            }
            EventKind::String if depth == 2 && last_key == "decision" => {
                if value.as_str() == Some("block") {
                    return Err(Error::new(
                        ErrorCode::Cancelled,
                        "moderation blocked the response",
                    ));
                }
                println!("moderation decision: {}", value.as_str().unwrap_or_default());
            }
            _ => {}
        }
        Ok(Action::Keep)
    });

    for (i, chunk) in stream.iter().enumerate() {
        if let Err(err) = parser.parse(chunk.as_bytes()) {
            eprintln!("stopped after chunk {i} of {}", stream.len());
            return Err(err);
        }
    }
    parser.complete(b"")
}

fn main() {
    match process(&ALLOWED) {
        Ok(value) => {
            println!("filename: {:?}", value.get("filename").and_then(Value::as_str));
            println!("code:\n{}", value.get("code").and_then(Value::as_str).unwrap_or_default());
            assert!(value.get("trace").is_none());
        }
        Err(err) => eprintln!("unexpected failure: {err}"),
    }

    match process(&BLOCKED) {
        Ok(_) => eprintln!("blocked response was accepted"),
        Err(err) => {
            assert_eq!(err.code(), ErrorCode::Cancelled);
            println!("{err}");
        }
    }
}

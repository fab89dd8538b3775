use alloc::{string::String, vec::Vec};

use quickcheck::{QuickCheck, TestResult};

use super::utils::{chunks, parse_chunks};
use crate::{JsonParser, KeepAll, ParserOptions, Value};

const MULTI: ParserOptions = ParserOptions {
    allow_comments: false,
    allow_trailing_garbage: false,
    allow_multiple_values: true,
    max_depth: ParserOptions::DEFAULT_MAX_DEPTH,
};

/// Property: a stream of several roots round-trips regardless of how it is
/// partitioned.
#[test]
fn multi_value_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(values: Vec<Value>, splits: Vec<usize>) -> TestResult {
        if values.is_empty() {
            return TestResult::discard();
        }

        let payload: String = values
            .iter()
            .map(|v| serde_json::to_string(v).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        let parts = chunks(payload.as_bytes(), &splits);

        match parse_chunks(MULTI, &parts) {
            Ok(parsed) => TestResult::from_bool(parsed == values),
            Err(_) => TestResult::failed(),
        }
    }

    QuickCheck::new()
        .tests(if is_ci::cached() { 5_000 } else { 500 })
        .quickcheck(prop as fn(Vec<Value>, Vec<usize>) -> TestResult);
}

#[test]
fn number_continues_across_chunks() {
    let values = parse_chunks(MULTI, &[b"1 2", b"3 4"]).unwrap();
    assert_eq!(
        values,
        [Value::Integer(1), Value::Integer(23), Value::Integer(4)]
    );
}

#[test]
fn drain_values_hands_out_completed_roots() {
    let mut parser = JsonParser::with_options(MULTI, KeepAll);
    parser.parse(b"{\"id\": 1}\n{\"id\"").unwrap();
    let first = parser.drain_values();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].get("id"), Some(&Value::Integer(1)));
    assert!(parser.drain_values().is_empty());

    parser.parse(b": 2}\n3").unwrap();
    let second = parser.drain_values();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].get("id"), Some(&Value::Integer(2)));

    // A number at the end of the stream is only complete at end of input.
    let rest = parser.complete_all(b"").unwrap();
    assert_eq!(rest, [Value::Integer(3)]);
}

#[test]
fn complete_rejects_multiple_pending_roots() {
    let mut parser = JsonParser::with_options(MULTI, KeepAll);
    parser.parse(b"1 2").unwrap();
    let err = parser.complete(b"").unwrap_err();
    assert_eq!(err.code(), crate::ErrorCode::FailedPrecondition);
}

#[test]
fn drained_stream_completes_empty() {
    let mut parser = JsonParser::with_options(MULTI, KeepAll);
    parser.parse(b"[1]\n").unwrap();
    assert_eq!(parser.drain_values().len(), 1);
    let err = parser.complete_all(b"").unwrap_err();
    assert_eq!(err.code(), crate::ErrorCode::EmptyResult);
}

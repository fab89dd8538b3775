use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use super::utils::oracle;
use crate::{Action, Error, ErrorCode, EventKind, JsonParser, Result, Value};

/// Parses `input` in one chunk with `filter`.
fn prune<F>(input: &str, filter: F) -> Result<Value>
where
    F: FnMut(usize, EventKind, &mut Value) -> Result<Action>,
{
    let mut parser = JsonParser::with_filter(filter);
    parser.parse(input.as_bytes())?;
    parser.complete(b"")
}

#[test]
fn discard_everything_is_empty_result() {
    let err = prune(r#"{"a": [1, 2]}"#, |_, _, _| Ok(Action::Discard)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmptyResult);

    let err = prune("42", |_, _, _| Ok(Action::Discard)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmptyResult);
}

#[test]
fn discarding_root_on_end_is_empty_result() {
    let err = prune("[1]", |_, kind, _| {
        Ok(if kind == EventKind::EndArray {
            Action::Discard
        } else {
            Action::Keep
        })
    })
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmptyResult);
}

#[test]
fn depth_of_root_scalar_and_array_element() {
    let mut seen = Vec::new();
    prune("7", |depth, kind, _| {
        seen.push((depth, kind));
        Ok(Action::Keep)
    })
    .unwrap();
    assert_eq!(seen, [(0, EventKind::Integer)]);

    let mut seen = Vec::new();
    prune(r#"["s"]"#, |depth, kind, _| {
        seen.push((depth, kind));
        Ok(Action::Keep)
    })
    .unwrap();
    assert_eq!(
        seen,
        [
            (0, EventKind::StartArray),
            (1, EventKind::String),
            (0, EventKind::EndArray),
        ]
    );
}

#[test]
fn depth_of_keys_matches_member_values() {
    let mut seen = Vec::new();
    prune(r#"{"a": {"b": null}}"#, |depth, kind, value| {
        seen.push(format!("{depth} {kind} {value:?}"));
        Ok(Action::Keep)
    })
    .unwrap();
    assert_eq!(
        seen,
        [
            "0 StartMap Object({})",
            "1 MapKey String(\"a\")",
            "1 StartMap Object({})",
            "2 MapKey String(\"b\")",
            "2 Null Null",
            "1 EndMap Object({\"b\": Null})",
            "0 EndMap Object({\"a\": Object({\"b\": Null})})",
        ]
    );
}

#[test]
fn discard_objects_at_depth_two_or_more() {
    let value = prune(r#"{"a":{"b":{"c":1}},"d":2}"#, |depth, kind, _| {
        Ok(if kind == EventKind::StartMap && depth >= 2 {
            Action::Discard
        } else {
            Action::Keep
        })
    })
    .unwrap();
    assert_eq!(value, oracle(r#"{"a":{},"d":2}"#));
}

#[test]
fn discarded_subtree_is_not_shown_to_filter() {
    let mut kinds = Vec::new();
    prune(r#"[1, {"x": [2, 3]}, 4]"#, |_, kind, _| {
        kinds.push(kind);
        Ok(if kind == EventKind::StartMap {
            Action::Discard
        } else {
            Action::Keep
        })
    })
    .unwrap();
    assert_eq!(
        kinds,
        [
            EventKind::StartArray,
            EventKind::Integer,
            EventKind::StartMap,
            EventKind::Integer,
            EventKind::EndArray,
        ]
    );
}

#[test]
fn discarded_key_skips_its_value() {
    let value = prune(
        r#"{"keep": 1, "drop": {"nested": [1, 2, {"deep": true}]}, "also": [null], "drop": "x"}"#,
        |_, kind, value| {
            Ok(if kind == EventKind::MapKey && value.as_str() == Some("drop") {
                Action::Discard
            } else {
                Action::Keep
            })
        },
    )
    .unwrap();
    assert_eq!(value, oracle(r#"{"keep": 1, "also": [null]}"#));
}

#[test]
fn discarded_member_value_drops_the_key() {
    let value = prune(r#"{"a": 1, "b": "two", "c": 3}"#, |_, kind, _| {
        Ok(if kind == EventKind::String {
            Action::Discard
        } else {
            Action::Keep
        })
    })
    .unwrap();
    assert_eq!(value, oracle(r#"{"a": 1, "c": 3}"#));
}

#[test]
fn filter_edits_are_kept() {
    let value = prune(r#"{"name": "ada", "tags": ["x"], "n": 41}"#, |_, kind, value| {
        match (kind, &mut *value) {
            (EventKind::MapKey, Value::String(key)) => *key = key.to_uppercase(),
            (EventKind::Integer, Value::Integer(n)) => *n += 1,
            (EventKind::StartArray, Value::Array(items)) => items.push(Value::from("first")),
            (EventKind::EndMap, Value::Object(map)) => {
                map.insert("seen".to_string(), Value::Boolean(true));
            }
            _ => {}
        }
        Ok(Action::Keep)
    })
    .unwrap();
    assert_eq!(
        value,
        oracle(r#"{"NAME": "ada", "TAGS": ["first", "x"], "N": 42, "seen": true}"#)
    );
}

#[test]
fn replacing_container_kind_is_invalid() {
    let err = prune(r#"{"a": []}"#, |_, kind, value| {
        if kind == EventKind::StartArray {
            *value = Value::Object(crate::Map::new());
        }
        Ok(Action::Keep)
    })
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

#[test]
fn replacing_key_with_non_string_is_invalid() {
    let err = prune(r#"{"a": 1}"#, |_, kind, value| {
        if kind == EventKind::MapKey {
            *value = Value::Integer(1);
        }
        Ok(Action::Keep)
    })
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

#[test]
fn failing_on_third_string_returns_that_error() {
    let mut strings = 0;
    let mut after_failure = 0;
    let err = prune(r#"["a", "b", "c", "d", 5]"#, |_, kind, value| {
        if strings == 3 {
            after_failure += 1;
        }
        if kind == EventKind::String {
            strings += 1;
            if strings == 3 {
                return Err(Error::aborted(format!("rejected {value:?}")));
            }
        }
        Ok(Action::Keep)
    })
    .unwrap_err();

    assert_eq!(err, Error::aborted("rejected String(\"c\")"));
    assert_eq!(after_failure, 0);
}

#[test]
fn filter_error_leaves_parser_failed() {
    let mut calls = 0;
    let mut parser = JsonParser::with_filter(|_: usize, _: EventKind, _: &mut Value| -> Result<Action> {
        calls += 1;
        Err(Error::new(ErrorCode::OutOfRange, "too deep"))
    });
    let err = parser.parse(b"[").unwrap_err();
    assert_eq!(err.code(), ErrorCode::OutOfRange);
    assert_eq!(parser.parse(b"]").unwrap_err().code(), ErrorCode::FailedPrecondition);
    drop(parser);
    assert_eq!(calls, 1);
}

#[test]
fn keys_can_be_renamed_onto_each_other() {
    let value = prune(r#"{"a": 1, "b": 2}"#, |_, kind, value| {
        if kind == EventKind::MapKey {
            *value = Value::String(String::from("same"));
        }
        Ok(Action::Keep)
    })
    .unwrap();
    assert_eq!(value, oracle(r#"{"same": 2}"#));
}

#[test]
fn depth_counts_kept_containers() {
    let mut parser = JsonParser::new();
    parser.parse(br#"{"a": [[1, "#).unwrap();
    assert_eq!(parser.depth(), 3);
    parser.parse(b"2]],").unwrap();
    assert_eq!(parser.depth(), 1);
    let value = parser.complete(br#""b": null}"#).unwrap();
    assert_eq!(value, oracle(r#"{"a": [[1, 2]], "b": null}"#));
}

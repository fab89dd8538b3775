#![no_main]

use arbitrary::Arbitrary;
use jsonprune::{Action, ErrorCode, EventKind, Filter, JsonParser, KeepAll, ParserOptions, Result, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    flags: u8,
    /// Chunk sizes; each is taken modulo the remaining input plus one.
    splits: Vec<u16>,
    /// Containers at or below this depth are discarded.
    prune_depth: u8,
    data: &'a [u8],
}

fn options(flags: u8) -> ParserOptions {
    ParserOptions {
        allow_comments: flags & 1 != 0,
        allow_trailing_garbage: flags & 2 != 0,
        allow_multiple_values: flags & 4 != 0,
        ..ParserOptions::default()
    }
}

fn chunks<'a>(data: &'a [u8], splits: &[u16]) -> Vec<&'a [u8]> {
    let mut out = Vec::new();
    let mut rest = data;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + usize::from(s) % rest.len());
        out.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

fn run<F: Filter>(options: ParserOptions, filter: F, parts: &[&[u8]]) -> Result<Vec<Value>> {
    let mut parser = JsonParser::with_options(options, filter);
    for part in parts {
        parser.parse(part)?;
    }
    parser.complete_all(b"")
}

fuzz_target!(|input: Input<'_>| {
    let options = options(input.flags);
    let prune_depth = usize::from(input.prune_depth % 8);
    let prune = |depth: usize, kind: EventKind, _: &mut Value| -> Result<Action> {
        Ok(if kind.is_container_start() && depth >= prune_depth {
            Action::Discard
        } else {
            Action::Keep
        })
    };

    // Splitting the input must not change the outcome: the same values, or an
    // error with the same code.
    let whole = run(options, KeepAll, &[input.data]);
    let split = run(options, KeepAll, &chunks(input.data, &input.splits));
    match (&whole, &split) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => assert_eq!(a.code(), b.code()),
        _ => panic!("whole: {whole:?}, split: {split:?}"),
    }

    // Pruning only removes parts of an accepted document.
    let pruned = run(options, prune, &chunks(input.data, &input.splits));
    if whole.is_ok() {
        match pruned {
            Ok(_) => {}
            Err(err) => assert_eq!(err.code(), ErrorCode::EmptyResult),
        }
    }
});

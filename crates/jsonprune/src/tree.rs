//! Building [`Value`] trees from tokenizer events, with pruning.
//!
//! [`JsonParser`] assembles the document as it streams through the tokenizer
//! and consults a [`Filter`] for every event. The filter sees the event kind,
//! the nesting depth and the value being built, may edit that value in place,
//! and decides whether it is kept. Discarded values are dropped at once, so a
//! filter that rejects large subtrees keeps memory use bounded by what it
//! retains rather than by the size of the input.
//!
//! ```
//! use jsonprune::{Action, EventKind, JsonParser, Result, Value};
//!
//! // Drop every object nested two or more levels deep.
//! let mut parser = JsonParser::with_filter(|depth: usize, kind: EventKind, _: &mut Value| -> Result<Action> {
//!     Ok(if kind == EventKind::StartMap && depth >= 2 {
//!         Action::Discard
//!     } else {
//!         Action::Keep
//!     })
//! });
//! parser.parse(br#"{"a":{"b":{"c":1}},"#).unwrap();
//! let value = parser.complete(br#""d":2}"#).unwrap();
//!
//! assert_eq!(value.get("a").and_then(Value::as_object).map(|m| m.len()), Some(0));
//! assert_eq!(value.get("d"), Some(&Value::Integer(2)));
//! ```
use alloc::{
    borrow::ToOwned,
    collections::VecDeque,
    format,
    string::String,
    vec::Vec,
};

use crate::{
    Array, Callbacks, Error, EventKind, Map, ParserOptions, Position, Result, Tokenizer, Value,
};

/// What to do with the value a [`Filter`] was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Attach the value, including any edits the filter made, to its parent.
    Keep,
    /// Drop the value.
    ///
    /// Discarding a container start or a map key skips everything the
    /// container or member would contain. The filter is not called again
    /// until the skipped input has been consumed: no start, key, scalar or
    /// end events from inside the subtree are reported, nor is the end of a
    /// discarded container. Only events in retained parts of the document
    /// reach the filter.
    Discard,
}

/// Decides, event by event, which parts of a document are retained.
///
/// `depth` counts the kept containers enclosing the value the event concerns:
/// a root scalar is at depth 0 and a string inside a root array at depth 1.
/// Container starts and ends are both reported at the depth of the container
/// itself, and a map key at the depth of its member value.
///
/// The `value` passed for each event kind:
///
/// | Event | `value` |
/// |-------|---------|
/// | `StartMap`, `StartArray` | the new empty container |
/// | `MapKey` | `Value::String` holding the key |
/// | scalars | the scalar |
/// | `EndMap`, `EndArray` | the completed container |
///
/// Editing a start container's contents or renaming a key is allowed.
/// Replacing a container with a different kind, or a key with a non-string,
/// fails the parse with [`ErrorCode::InvalidArgument`](crate::ErrorCode).
///
/// Returning an error aborts the parse with that error.
pub trait Filter {
    /// Inspects the value for one event and decides whether it is kept.
    ///
    /// # Errors
    ///
    /// Any error returned stops the parse and is returned unchanged to the
    /// caller of [`JsonParser::parse`] or [`JsonParser::complete`].
    fn filter(&mut self, depth: usize, kind: EventKind, value: &mut Value) -> Result<Action>;
}

impl<F> Filter for F
where
    F: FnMut(usize, EventKind, &mut Value) -> Result<Action>,
{
    fn filter(&mut self, depth: usize, kind: EventKind, value: &mut Value) -> Result<Action> {
        self(depth, kind, value)
    }
}

/// Keeps everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepAll;

impl Filter for KeepAll {
    #[inline]
    fn filter(&mut self, _depth: usize, _kind: EventKind, _value: &mut Value) -> Result<Action> {
        Ok(Action::Keep)
    }
}

#[derive(Debug)]
enum Frame {
    Array(Array),
    Object {
        map: Map,
        /// Key of the member whose value comes next.
        pending_key: Option<String>,
    },
}

#[derive(Debug)]
struct TreeSink<F> {
    filter: F,
    frames: Vec<Frame>,
    /// Containers still open inside a discarded subtree. `Some(0)` means the
    /// next value belongs to a discarded key.
    skip: Option<usize>,
    /// Completed top-level values not yet handed out.
    roots: VecDeque<Value>,
}

impl<F: Filter> TreeSink<F> {
    fn new(filter: F) -> Self {
        Self {
            filter,
            frames: Vec::new(),
            skip: None,
            roots: VecDeque::new(),
        }
    }

    fn scalar(&mut self, kind: EventKind, value: Value) -> Result<()> {
        match self.skip {
            Some(0) => {
                self.skip = None;
                Ok(())
            }
            Some(_) => Ok(()),
            None => self.deliver(kind, value),
        }
    }

    fn start(&mut self, kind: EventKind) -> Result<()> {
        if let Some(open) = self.skip {
            self.skip = Some(open + 1);
            return Ok(());
        }

        let depth = self.frames.len();
        let mut value = if kind == EventKind::StartMap {
            Value::Object(Map::new())
        } else {
            Value::Array(Array::new())
        };

        match self.filter.filter(depth, kind, &mut value)? {
            Action::Keep => {
                let frame = match (kind, value) {
                    (EventKind::StartMap, Value::Object(map)) => Frame::Object {
                        map,
                        pending_key: None,
                    },
                    (EventKind::StartArray, Value::Array(array)) => Frame::Array(array),
                    _ => {
                        return Err(Error::invalid_argument(format!(
                            "filter replaced the container at {kind} with a value of another kind"
                        )));
                    }
                };
                self.frames.push(frame);
            }
            Action::Discard => {
                tracing::trace!(depth, %kind, "discarding container");
                self.skip = Some(1);
                self.clear_pending_key();
            }
        }
        Ok(())
    }

    fn end(&mut self, kind: EventKind) -> Result<()> {
        if let Some(open) = self.skip {
            self.skip = open.checked_sub(1).filter(|&open| open > 0);
            return Ok(());
        }

        let value = match self.frames.pop() {
            Some(Frame::Array(array)) => Value::Array(array),
            Some(Frame::Object { map, .. }) => Value::Object(map),
            None => return Err(Error::internal("container end without an open container")),
        };
        self.deliver(kind, value)
    }

    fn key(&mut self, key: &str) -> Result<()> {
        if self.skip.is_some() {
            return Ok(());
        }

        let depth = self.frames.len();
        let mut value = Value::String(key.to_owned());
        match self.filter.filter(depth, EventKind::MapKey, &mut value)? {
            Action::Keep => {
                let Value::String(key) = value else {
                    return Err(Error::invalid_argument(
                        "filter replaced a map key with a non-string value",
                    ));
                };
                match self.frames.last_mut() {
                    Some(Frame::Object { pending_key, .. }) => *pending_key = Some(key),
                    _ => return Err(Error::internal("map key outside of an object")),
                }
            }
            Action::Discard => {
                tracing::trace!(depth, "discarding member");
                self.skip = Some(0);
            }
        }
        Ok(())
    }

    /// Runs the filter on a completed value and attaches it if kept.
    fn deliver(&mut self, kind: EventKind, mut value: Value) -> Result<()> {
        let depth = self.frames.len();
        match self.filter.filter(depth, kind, &mut value)? {
            Action::Keep => self.attach(value),
            Action::Discard => {
                tracing::trace!(depth, %kind, "discarding value");
                self.clear_pending_key();
                Ok(())
            }
        }
    }

    fn attach(&mut self, value: Value) -> Result<()> {
        match self.frames.last_mut() {
            None => self.roots.push_back(value),
            Some(Frame::Array(array)) => array.push(value),
            Some(Frame::Object { map, pending_key }) => {
                let key = pending_key
                    .take()
                    .ok_or_else(|| Error::internal("object member without a key"))?;
                map.insert(key, value);
            }
        }
        Ok(())
    }

    fn clear_pending_key(&mut self) {
        if let Some(Frame::Object { pending_key, .. }) = self.frames.last_mut() {
            *pending_key = None;
        }
    }
}

impl<F: Filter> Callbacks for TreeSink<F> {
    fn null(&mut self) -> Result<()> {
        self.scalar(EventKind::Null, Value::Null)
    }
    fn boolean(&mut self, value: bool) -> Result<()> {
        self.scalar(EventKind::Boolean, Value::Boolean(value))
    }
    fn integer(&mut self, value: i64) -> Result<()> {
        self.scalar(EventKind::Integer, Value::Integer(value))
    }
    fn double(&mut self, value: f64) -> Result<()> {
        self.scalar(EventKind::Double, Value::Double(value))
    }
    fn string(&mut self, value: &str) -> Result<()> {
        if self.skip.is_some() {
            // Avoid the allocation for skipped strings.
            return self.scalar(EventKind::String, Value::Null);
        }
        self.scalar(EventKind::String, Value::String(value.to_owned()))
    }
    fn start_map(&mut self) -> Result<()> {
        self.start(EventKind::StartMap)
    }
    fn map_key(&mut self, key: &str) -> Result<()> {
        self.key(key)
    }
    fn end_map(&mut self) -> Result<()> {
        self.end(EventKind::EndMap)
    }
    fn start_array(&mut self) -> Result<()> {
        self.start(EventKind::StartArray)
    }
    fn end_array(&mut self) -> Result<()> {
        self.end(EventKind::EndArray)
    }
}

/// Incremental JSON parser producing a pruned [`Value`] tree.
///
/// Feed input with [`parse`](Self::parse) in chunks of any size, then call
/// [`complete`](Self::complete) once. The result does not depend on how the
/// input was split.
#[derive(Debug)]
pub struct JsonParser<F = KeepAll> {
    tokenizer: Tokenizer<TreeSink<F>>,
}

impl JsonParser<KeepAll> {
    /// A parser that keeps the whole document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_filter(KeepAll)
    }
}

impl Default for JsonParser<KeepAll> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filter> JsonParser<F> {
    /// A parser consulting `filter`, with the default [`ParserOptions`].
    pub fn with_filter(filter: F) -> Self {
        Self::with_options(ParserOptions::default(), filter)
    }

    /// A parser consulting `filter` that accepts the grammar extensions
    /// enabled in `options`.
    pub fn with_options(options: ParserOptions, filter: F) -> Self {
        Self {
            tokenizer: Tokenizer::with_options(TreeSink::new(filter), options),
        }
    }

    /// Feeds the next chunk of input.
    ///
    /// # Errors
    ///
    /// See [`Tokenizer::feed`]. Errors returned by the filter are passed
    /// through unchanged.
    pub fn parse(&mut self, bytes: &[u8]) -> Result<()> {
        self.tokenizer.feed(bytes)
    }

    /// Feeds `trailing` and ends the input, returning the document.
    ///
    /// # Errors
    ///
    /// - As [`Tokenizer::finish`].
    /// - [`ErrorCode::EmptyResult`](crate::ErrorCode::EmptyResult) if the
    ///   filter discarded the top-level value or it was already drained.
    /// - [`ErrorCode::FailedPrecondition`](crate::ErrorCode::FailedPrecondition)
    ///   if more than one top-level value is pending; use
    ///   [`complete_all`](Self::complete_all) for multi-value input.
    pub fn complete(self, trailing: &[u8]) -> Result<Value> {
        let mut values = self.finish(trailing)?;
        let Some(value) = values.pop_front() else {
            return Err(Error::empty_result("no value was retained"));
        };
        if !values.is_empty() {
            return Err(Error::failed_precondition(format!(
                "{} top-level values are pending, use `complete_all`",
                values.len() + 1
            )));
        }
        Ok(value)
    }

    /// Like [`complete`](Self::complete), returning every pending top-level
    /// value in input order.
    ///
    /// # Errors
    ///
    /// As [`complete`](Self::complete), except that several values are not an
    /// error.
    pub fn complete_all(self, trailing: &[u8]) -> Result<Vec<Value>> {
        let values = self.finish(trailing)?;
        if values.is_empty() {
            return Err(Error::empty_result("no value was retained"));
        }
        Ok(values.into())
    }

    /// Takes the top-level values completed so far.
    ///
    /// Useful with [`ParserOptions::allow_multiple_values`] to consume a
    /// newline-delimited stream as it arrives.
    pub fn drain_values(&mut self) -> Vec<Value> {
        self.tokenizer.callbacks_mut().roots.drain(..).collect()
    }

    /// Number of open containers that are being kept.
    pub fn depth(&self) -> usize {
        self.tokenizer.callbacks().frames.len()
    }

    /// Location of the next unread byte.
    pub fn position(&self) -> Position {
        self.tokenizer.position()
    }

    fn finish(mut self, trailing: &[u8]) -> Result<VecDeque<Value>> {
        self.tokenizer.finish(trailing)?;
        Ok(self.tokenizer.into_callbacks().roots)
    }
}

/// Parses a complete document held in memory.
///
/// # Errors
///
/// See [`JsonParser::complete`].
///
/// ```
/// use jsonprune::{Value, from_slice};
///
/// assert_eq!(from_slice(b"[true]").unwrap(), Value::Array(vec![Value::Boolean(true)]));
/// ```
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    JsonParser::new().complete(bytes)
}

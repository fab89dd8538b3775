//! Events reported by the tokenizer.
//!
//! A [`ParseEvent`] is one lexical unit of JSON structure: a scalar value or a
//! container boundary. Events arrive strictly in document order and always
//! describe a well-formed prefix of a JSON text: keys only appear between
//! `StartMap` and `EndMap`, and containers are balanced.
//!
//! ```
//! use jsonprune::{EventKind, ParseEvent};
//!
//! let event = ParseEvent::MapKey("id");
//! assert_eq!(event.kind(), EventKind::MapKey);
//! assert!(!event.kind().is_scalar());
//! ```
use core::fmt;

/// One tokenizer event. String payloads borrow from the tokenizer and are
/// only valid for the duration of the callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseEvent<'a> {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// A number without fraction or exponent that fits in an `i64`.
    Integer(i64),
    /// Any other number.
    Double(f64),
    /// A string value, unescaped.
    String(&'a str),
    /// `{`.
    StartMap,
    /// An object member name, unescaped.
    MapKey(&'a str),
    /// `}`.
    EndMap,
    /// `[`.
    StartArray,
    /// `]`.
    EndArray,
}

impl ParseEvent<'_> {
    /// The event without its payload.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            ParseEvent::Null => EventKind::Null,
            ParseEvent::Boolean(_) => EventKind::Boolean,
            ParseEvent::Integer(_) => EventKind::Integer,
            ParseEvent::Double(_) => EventKind::Double,
            ParseEvent::String(_) => EventKind::String,
            ParseEvent::StartMap => EventKind::StartMap,
            ParseEvent::MapKey(_) => EventKind::MapKey,
            ParseEvent::EndMap => EventKind::EndMap,
            ParseEvent::StartArray => EventKind::StartArray,
            ParseEvent::EndArray => EventKind::EndArray,
        }
    }
}

/// The payload-free kind of a [`ParseEvent`], as passed to a
/// [`Filter`](crate::Filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`ParseEvent::Null`].
    Null,
    /// See [`ParseEvent::Boolean`].
    Boolean,
    /// See [`ParseEvent::Integer`].
    Integer,
    /// See [`ParseEvent::Double`].
    Double,
    /// See [`ParseEvent::String`].
    String,
    /// See [`ParseEvent::StartMap`].
    StartMap,
    /// See [`ParseEvent::MapKey`].
    MapKey,
    /// See [`ParseEvent::EndMap`].
    EndMap,
    /// See [`ParseEvent::StartArray`].
    StartArray,
    /// See [`ParseEvent::EndArray`].
    EndArray,
}

impl EventKind {
    /// `true` for events that carry a complete scalar value.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            EventKind::Null
                | EventKind::Boolean
                | EventKind::Integer
                | EventKind::Double
                | EventKind::String
        )
    }

    /// `true` for `StartMap` and `StartArray`.
    #[must_use]
    pub fn is_container_start(self) -> bool {
        matches!(self, EventKind::StartMap | EventKind::StartArray)
    }

    /// `true` for `EndMap` and `EndArray`.
    #[must_use]
    pub fn is_container_end(self) -> bool {
        matches!(self, EventKind::EndMap | EventKind::EndArray)
    }

    /// `true` for events after which a complete value exists: scalars and
    /// container ends.
    #[must_use]
    pub fn completes_value(self) -> bool {
        self.is_scalar() || self.is_container_end()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

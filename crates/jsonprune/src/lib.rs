//! Push-style streaming JSON parsing with in-flight pruning.
//!
//! Input arrives in chunks of any size, split anywhere, and is consumed as it
//! arrives. Two levels of API are offered:
//!
//! - [`Tokenizer`] reports every lexical event to a [`Callbacks`]
//!   implementation. A callback can stop the parse by returning an [`Error`],
//!   which is then returned to the caller unchanged.
//! - [`JsonParser`] builds a [`Value`] tree from those events and asks a
//!   [`Filter`] about each one. The filter can edit values, rename keys and
//!   drop whole subtrees before they are ever materialized.
//!
//! ```rust
//! use jsonprune::{Action, EventKind, JsonParser, Result, Value};
//!
//! // Keep only the "id" member of each object in a root array.
//! let mut parser = JsonParser::with_filter(|depth: usize, kind: EventKind, value: &mut Value| -> Result<Action> {
//!     if kind == EventKind::MapKey && depth == 2 && value.as_str() != Some("id") {
//!         return Ok(Action::Discard);
//!     }
//!     Ok(Action::Keep)
//! });
//!
//! parser.parse(br#"[{"id": 1, "payload": [1, 2, 3]}, {"id""#).unwrap();
//! let value = parser.complete(br#": 2, "payload": null}]"#).unwrap();
//!
//! let ids: Vec<_> = value
//!     .as_array()
//!     .unwrap()
//!     .iter()
//!     .map(|item| item.get("id").and_then(Value::as_i64))
//!     .collect();
//! assert_eq!(ids, [Some(1), Some(2)]);
//! assert!(value.as_array().unwrap()[0].get("payload").is_none());
//! ```
//!
//! The crate is `no_std` and needs only `alloc`.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod event;
mod lexer;
mod options;
mod tokenizer;
mod tree;
mod value;

#[cfg(test)]
mod tests;

pub use error::{Error, ErrorCode, Result};
pub use event::{EventKind, ParseEvent};
pub use lexer::Position;
pub use options::ParserOptions;
pub use tokenizer::{Callbacks, OnEvent, Tokenizer};
pub use tree::{Action, Filter, JsonParser, KeepAll, from_slice};
pub use value::{Array, Map, Value};

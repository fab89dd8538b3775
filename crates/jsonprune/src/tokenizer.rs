//! Event-level access to the push tokenizer.
//!
//! A [`Tokenizer`] is fed chunks of JSON text and calls a [`Callbacks`]
//! implementation for every event, in document order, while the chunk is being
//! consumed. Any callback may return an [`Error`] to stop the parse; that error
//! is what the pending [`feed`](Tokenizer::feed) or
//! [`finish`](Tokenizer::finish) returns.
//!
//! ```
//! use jsonprune::{OnEvent, ParseEvent, Result, Tokenizer};
//!
//! let mut keys = Vec::new();
//! let mut tokenizer = Tokenizer::new(OnEvent(|event: ParseEvent<'_>| -> Result<()> {
//!     if let ParseEvent::MapKey(key) = event {
//!         keys.push(key.to_owned());
//!     }
//!     Ok(())
//! }));
//! tokenizer.feed(br#"{"name": "ada", "#).unwrap();
//! tokenizer.finish(br#""born": 1815}"#).unwrap();
//! drop(tokenizer);
//! assert_eq!(keys, ["name", "born"]);
//! ```
use alloc::boxed::Box;

use crate::{
    Error, ErrorCode, ParseEvent, ParserOptions, Result,
    lexer::{LexHandler, LexStatus, Lexer, Position, SyntaxError},
};

/// Receives tokenizer events.
///
/// Every method defaults to accepting the event and doing nothing. Returning
/// an error stops the parse immediately; no further events are delivered.
pub trait Callbacks {
    /// `null`.
    fn null(&mut self) -> Result<()> {
        Ok(())
    }
    /// `true` or `false`.
    fn boolean(&mut self, _value: bool) -> Result<()> {
        Ok(())
    }
    /// An integer that fits in an `i64`. Larger integers arrive as
    /// [`double`](Self::double).
    fn integer(&mut self, _value: i64) -> Result<()> {
        Ok(())
    }
    /// A number with a fraction or exponent, or an integer outside the
    /// `i64` range.
    fn double(&mut self, _value: f64) -> Result<()> {
        Ok(())
    }
    /// A string value with escapes decoded. The slice is only valid for
    /// the duration of the call.
    fn string(&mut self, _value: &str) -> Result<()> {
        Ok(())
    }
    /// Start of an object.
    fn start_map(&mut self) -> Result<()> {
        Ok(())
    }
    /// An object member name. The member's value follows.
    fn map_key(&mut self, _key: &str) -> Result<()> {
        Ok(())
    }
    /// End of the innermost open object.
    fn end_map(&mut self) -> Result<()> {
        Ok(())
    }
    /// Start of an array.
    fn start_array(&mut self) -> Result<()> {
        Ok(())
    }
    /// End of the innermost open array.
    fn end_array(&mut self) -> Result<()> {
        Ok(())
    }
}

macro_rules! forward_callbacks {
    () => {
        fn null(&mut self) -> Result<()> {
            (**self).null()
        }
        fn boolean(&mut self, value: bool) -> Result<()> {
            (**self).boolean(value)
        }
        fn integer(&mut self, value: i64) -> Result<()> {
            (**self).integer(value)
        }
        fn double(&mut self, value: f64) -> Result<()> {
            (**self).double(value)
        }
        fn string(&mut self, value: &str) -> Result<()> {
            (**self).string(value)
        }
        fn start_map(&mut self) -> Result<()> {
            (**self).start_map()
        }
        fn map_key(&mut self, key: &str) -> Result<()> {
            (**self).map_key(key)
        }
        fn end_map(&mut self) -> Result<()> {
            (**self).end_map()
        }
        fn start_array(&mut self) -> Result<()> {
            (**self).start_array()
        }
        fn end_array(&mut self) -> Result<()> {
            (**self).end_array()
        }
    };
}

impl<C: Callbacks + ?Sized> Callbacks for &mut C {
    forward_callbacks!();
}

impl<C: Callbacks + ?Sized> Callbacks for Box<C> {
    forward_callbacks!();
}

/// Adapts a closure over [`ParseEvent`] into [`Callbacks`].
#[derive(Debug, Clone)]
pub struct OnEvent<F>(pub F);

impl<F> Callbacks for OnEvent<F>
where
    F: FnMut(ParseEvent<'_>) -> Result<()>,
{
    fn null(&mut self) -> Result<()> {
        (self.0)(ParseEvent::Null)
    }
    fn boolean(&mut self, value: bool) -> Result<()> {
        (self.0)(ParseEvent::Boolean(value))
    }
    fn integer(&mut self, value: i64) -> Result<()> {
        (self.0)(ParseEvent::Integer(value))
    }
    fn double(&mut self, value: f64) -> Result<()> {
        (self.0)(ParseEvent::Double(value))
    }
    fn string(&mut self, value: &str) -> Result<()> {
        (self.0)(ParseEvent::String(value))
    }
    fn start_map(&mut self) -> Result<()> {
        (self.0)(ParseEvent::StartMap)
    }
    fn map_key(&mut self, key: &str) -> Result<()> {
        (self.0)(ParseEvent::MapKey(key))
    }
    fn end_map(&mut self) -> Result<()> {
        (self.0)(ParseEvent::EndMap)
    }
    fn start_array(&mut self) -> Result<()> {
        (self.0)(ParseEvent::StartArray)
    }
    fn end_array(&mut self) -> Result<()> {
        (self.0)(ParseEvent::EndArray)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Finished,
    Failed,
}

/// Push tokenizer delivering events to `C`.
///
/// Once a call fails, or after a successful [`finish`](Self::finish), every
/// further call returns [`ErrorCode::FailedPrecondition`].
#[derive(Debug)]
pub struct Tokenizer<C> {
    lexer: Lexer,
    callbacks: C,
    /// Error returned by the callback that cancelled the current call.
    last_error: Option<Error>,
    state: State,
}

impl<C: Callbacks> Tokenizer<C> {
    /// A tokenizer with the default [`ParserOptions`].
    pub fn new(callbacks: C) -> Self {
        Self::with_options(callbacks, ParserOptions::default())
    }

    /// A tokenizer accepting the grammar extensions enabled in `options`.
    pub fn with_options(callbacks: C, options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(options),
            callbacks,
            last_error: None,
            state: State::Active,
        }
    }

    /// Feeds the next chunk of input. Callbacks run before this returns.
    ///
    /// # Errors
    ///
    /// - [`ErrorCode::Syntax`] when the input is malformed; the message
    ///   includes the input around the failure.
    /// - Whatever error a callback returned.
    /// - [`ErrorCode::FailedPrecondition`] if the tokenizer already failed or
    ///   finished.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_active()?;
        let mut bridge = Bridge {
            callbacks: &mut self.callbacks,
            last_error: &mut self.last_error,
        };
        let status = self.lexer.parse(&mut bridge, bytes);
        self.check(status, bytes)
    }

    /// Feeds `trailing`, if non-empty, then signals end of input.
    ///
    /// # Errors
    ///
    /// As [`feed`](Self::feed), plus [`ErrorCode::IncompleteDocument`] when
    /// input ends inside a value or before any value.
    pub fn finish(&mut self, trailing: &[u8]) -> Result<()> {
        if !trailing.is_empty() {
            self.feed(trailing)?;
        }
        self.ensure_active()?;

        let mut bridge = Bridge {
            callbacks: &mut self.callbacks,
            last_error: &mut self.last_error,
        };
        let status = self.lexer.complete(&mut bridge);
        self.check(status, &[])?;
        self.state = State::Finished;
        Ok(())
    }

    /// Location of the next unread byte.
    pub fn position(&self) -> Position {
        self.lexer.position()
    }

    /// Number of containers currently open in the input.
    pub fn depth(&self) -> usize {
        self.lexer.depth()
    }

    /// The callbacks events are delivered to.
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    /// Mutable access to the callbacks, for use between chunks.
    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    /// Consumes the tokenizer and returns its callbacks.
    pub fn into_callbacks(self) -> C {
        self.callbacks
    }

    fn ensure_active(&self) -> Result<()> {
        match self.state {
            State::Active => Ok(()),
            State::Finished => Err(Error::failed_precondition(
                "tokenizer has already finished",
            )),
            State::Failed => Err(Error::failed_precondition(
                "tokenizer has failed and cannot accept more input",
            )),
        }
    }

    /// Converts a lexer status into a result. `chunk` is the input of the call
    /// that produced `status`, used to render syntax errors.
    fn check(&mut self, status: LexStatus, chunk: &[u8]) -> Result<()> {
        match status {
            LexStatus::Ok => Ok(()),
            LexStatus::ClientCanceled => {
                self.state = State::Failed;
                let err = self.last_error.take().unwrap_or_else(|| {
                    Error::internal("parse was cancelled without a recorded error")
                });
                tracing::debug!(code = %err.code(), "callback aborted parse");
                Err(err)
            }
            LexStatus::Error => {
                self.state = State::Failed;
                let Some(lex_error) = self.lexer.error() else {
                    return Err(Error::internal("lexer failed without a recorded error"));
                };
                let code = if lex_error.kind == SyntaxError::PrematureEof {
                    ErrorCode::IncompleteDocument
                } else {
                    ErrorCode::Syntax
                };
                Err(Error::new(code, lex_error.render(chunk)).context("error while parsing JSON"))
            }
        }
    }
}

/// Hands lexer events to the callbacks for the duration of one call, keeping
/// the first error a callback returns.
struct Bridge<'a, C> {
    callbacks: &'a mut C,
    last_error: &'a mut Option<Error>,
}

impl<C: Callbacks> Bridge<'_, C> {
    fn forward(&mut self, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                *self.last_error = Some(err);
                false
            }
        }
    }
}

impl<C: Callbacks> LexHandler for Bridge<'_, C> {
    fn on_null(&mut self) -> bool {
        let result = self.callbacks.null();
        self.forward(result)
    }
    fn on_boolean(&mut self, value: bool) -> bool {
        let result = self.callbacks.boolean(value);
        self.forward(result)
    }
    fn on_integer(&mut self, value: i64) -> bool {
        let result = self.callbacks.integer(value);
        self.forward(result)
    }
    fn on_double(&mut self, value: f64) -> bool {
        let result = self.callbacks.double(value);
        self.forward(result)
    }
    fn on_string(&mut self, value: &str) -> bool {
        let result = self.callbacks.string(value);
        self.forward(result)
    }
    fn on_start_map(&mut self) -> bool {
        let result = self.callbacks.start_map();
        self.forward(result)
    }
    fn on_map_key(&mut self, key: &str) -> bool {
        let result = self.callbacks.map_key(key);
        self.forward(result)
    }
    fn on_end_map(&mut self) -> bool {
        let result = self.callbacks.end_map();
        self.forward(result)
    }
    fn on_start_array(&mut self) -> bool {
        let result = self.callbacks.start_array();
        self.forward(result)
    }
    fn on_end_array(&mut self) -> bool {
        let result = self.callbacks.end_array();
        self.forward(result)
    }
}

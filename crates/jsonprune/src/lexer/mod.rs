//! Push tokenizer for JSON text.
//!
//! The lexer is fed byte chunks of any size and reports each lexical event
//! synchronously through a [`LexHandler`]. Handler methods answer with a
//! `bool`: `true` lets the lexer continue, `false` stops it on the spot and
//! the call that was running reports [`LexStatus::ClientCanceled`]. Nothing
//! about *why* the handler stopped travels through the lexer; the
//! [`Tokenizer`](crate::Tokenizer) adapter keeps that on its side.
//!
//! Input may be split anywhere, including inside a token or a multi-byte
//! UTF-8 sequence. Token bytes that straddle a chunk boundary are carried over
//! in a scratch buffer; everything else is scanned in place.
//!
//! State is kept in two layers, as in most hand written JSON parsers:
//! - `ParseState` tracks where in the grammar we are (what may come next), with
//!   a stack of open containers.
//! - `LexState` tracks the token in progress, if any.
//!
//! On a syntax error the lexer records the error with its position and stops.
//! The diagnostic is only rendered on request ([`LexError::render`]), since
//! rendering copies input around the failure position.

mod error;
mod escape_buffer;
mod literal_buffer;
mod number;

use alloc::vec::Vec;

use escape_buffer::{Decoded, UnicodeEscapeBuffer};
use literal_buffer::{ExpectedLiteralBuffer, Literal, Step};
use number::{Number, NumberState};

pub use self::error::Position;
pub(crate) use self::error::{LexError, SyntaxError};
use crate::ParserOptions;

/// Receives lexical events. Returning `false` cancels the parse.
pub(crate) trait LexHandler {
    fn on_null(&mut self) -> bool;
    fn on_boolean(&mut self, value: bool) -> bool;
    fn on_integer(&mut self, value: i64) -> bool;
    fn on_double(&mut self, value: f64) -> bool;
    fn on_string(&mut self, value: &str) -> bool;
    fn on_start_map(&mut self) -> bool;
    fn on_map_key(&mut self, key: &str) -> bool;
    fn on_end_map(&mut self) -> bool;
    fn on_start_array(&mut self) -> bool;
    fn on_end_array(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexStatus {
    Ok,
    /// A handler method returned `false`.
    ClientCanceled,
    /// Malformed input; see [`Lexer::error`].
    Error,
}

/// Why a step stopped.
enum Halt {
    Syntax(SyntaxError),
    Canceled,
}

impl From<SyntaxError> for Halt {
    fn from(err: SyntaxError) -> Self {
        Halt::Syntax(err)
    }
}

#[inline]
fn emit(proceed: bool) -> Result<(), Halt> {
    if proceed { Ok(()) } else { Err(Halt::Canceled) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Expecting a top-level value.
    Start,
    /// After `[`: a value or `]`.
    ArrayFirst,
    /// After `,` in an array: a value.
    ArrayNeedValue,
    /// After an array element: `,` or `]`.
    ArrayAfterValue,
    /// After `{`: a key or `}`.
    ObjectFirst,
    /// After `,` in an object: a key.
    ObjectNeedKey,
    /// After a key: `:`.
    ObjectColon,
    /// After `:`: a value.
    ObjectNeedValue,
    /// After a member value: `,` or `}`.
    ObjectAfterValue,
    /// A top-level value is complete.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comment {
    /// Saw `/`.
    Open,
    Line,
    Block,
    /// Saw `*` inside a block comment.
    BlockStar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Between tokens.
    Idle,
    String { key: bool },
    StringEscape { key: bool },
    StringUnicode { key: bool },
    /// A high surrogate was decoded; expecting the `\` of the low half.
    StringSurrogate { key: bool },
    /// Expecting the `u` of the low half.
    StringSurrogateU { key: bool },
    Literal,
    Number(NumberState),
    Comment(Comment),
    /// Ignoring everything after the first value.
    Garbage,
}

#[derive(Debug)]
pub(crate) struct Lexer {
    options: ParserOptions,
    parse_state: ParseState,
    lex_state: LexState,
    containers: Vec<Container>,

    /// Bytes of the token in progress (strings and numbers).
    scratch: Vec<u8>,
    escape: UnicodeEscapeBuffer,
    literal: ExpectedLiteralBuffer,

    /// Position of the next unread byte.
    position: Position,
    /// Top-level values completed so far.
    values: usize,

    error: Option<LexError>,
}

impl Lexer {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            parse_state: ParseState::Start,
            lex_state: LexState::Idle,
            containers: Vec::new(),
            scratch: Vec::new(),
            escape: UnicodeEscapeBuffer::new(),
            literal: ExpectedLiteralBuffer::none(),
            position: Position::default(),
            values: 0,
            error: None,
        }
    }

    /// Position of the next unread byte.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of open containers.
    pub fn depth(&self) -> usize {
        self.containers.len()
    }

    /// The syntax error that stopped the lexer, if any.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    /// Consumes `chunk`, reporting events to `handler`.
    pub fn parse<H: LexHandler + ?Sized>(&mut self, handler: &mut H, chunk: &[u8]) -> LexStatus {
        if self.error.is_some() {
            return LexStatus::Error;
        }

        let mut index = 0;
        while index < chunk.len() {
            match self.step(handler, &chunk[index..]) {
                Ok(consumed) => {
                    self.position.advance(&chunk[index..index + consumed]);
                    index += consumed;
                }
                Err(halt) => return self.halt(halt, Some(index)),
            }
        }

        LexStatus::Ok
    }

    /// Signals end of input. Flushes a pending number and checks that the
    /// document is complete.
    pub fn complete<H: LexHandler + ?Sized>(&mut self, handler: &mut H) -> LexStatus {
        if self.error.is_some() {
            return LexStatus::Error;
        }

        match self.finish_pending(handler) {
            Ok(()) => LexStatus::Ok,
            Err(halt) => self.halt(halt, None),
        }
    }

    fn halt(&mut self, halt: Halt, chunk_index: Option<usize>) -> LexStatus {
        match halt {
            Halt::Canceled => {
                tracing::trace!(offset = self.position.offset, "handler canceled parse");
                LexStatus::ClientCanceled
            }
            Halt::Syntax(kind) => {
                tracing::debug!(
                    line = self.position.line,
                    column = self.position.column,
                    error = %kind,
                    "syntax error"
                );
                self.error = Some(LexError {
                    kind,
                    position: self.position,
                    chunk_index,
                });
                LexStatus::Error
            }
        }
    }

    fn finish_pending<H: LexHandler + ?Sized>(&mut self, handler: &mut H) -> Result<(), Halt> {
        match self.lex_state {
            LexState::Number(state) => {
                state.at_end()?;
                self.finish_number(handler, state)?;
            }
            LexState::Idle | LexState::Garbage | LexState::Comment(Comment::Line) => {}
            _ => return Err(SyntaxError::PrematureEof.into()),
        }

        match self.parse_state {
            ParseState::End => Ok(()),
            ParseState::Start if self.values > 0 => Ok(()),
            _ => Err(SyntaxError::PrematureEof.into()),
        }
    }

    /// Examines `rest[0]` (and possibly more). Returns how many bytes were
    /// consumed; zero means the byte must be examined again in the new state.
    fn step<H: LexHandler + ?Sized>(&mut self, handler: &mut H, rest: &[u8]) -> Result<usize, Halt> {
        let byte = rest[0];
        match self.lex_state {
            LexState::Idle => {
                self.between_tokens(handler, byte)?;
                Ok(1)
            }
            LexState::String { key } => {
                let run = rest
                    .iter()
                    .position(|&b| b == b'"' || b == b'\\' || b < 0x20)
                    .unwrap_or(rest.len());
                if run > 0 {
                    self.scratch.extend_from_slice(&rest[..run]);
                    return Ok(run);
                }
                match byte {
                    b'"' => self.finish_string(handler, key)?,
                    b'\\' => self.lex_state = LexState::StringEscape { key },
                    _ => return Err(SyntaxError::InvalidStringChar.into()),
                }
                Ok(1)
            }
            LexState::StringEscape { key } => {
                let unescaped = match byte {
                    b'"' => b'"',
                    b'\\' => b'\\',
                    b'/' => b'/',
                    b'b' => 0x08,
                    b'f' => 0x0C,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'u' => {
                        self.escape.reset();
                        self.lex_state = LexState::StringUnicode { key };
                        return Ok(1);
                    }
                    _ => return Err(SyntaxError::InvalidEscape.into()),
                };
                self.scratch.push(unescaped);
                self.lex_state = LexState::String { key };
                Ok(1)
            }
            LexState::StringUnicode { key } => {
                if let Some(unit) = self.escape.feed(byte)? {
                    self.lex_state = match self.escape.combine(unit)? {
                        Decoded::Char(c) => {
                            let mut buf = [0u8; 4];
                            self.scratch.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                            LexState::String { key }
                        }
                        Decoded::NeedLowSurrogate => LexState::StringSurrogate { key },
                    };
                }
                Ok(1)
            }
            LexState::StringSurrogate { key } => {
                if byte != b'\\' {
                    return Err(SyntaxError::UnpairedSurrogate.into());
                }
                self.lex_state = LexState::StringSurrogateU { key };
                Ok(1)
            }
            LexState::StringSurrogateU { key } => {
                if byte != b'u' {
                    return Err(SyntaxError::UnpairedSurrogate.into());
                }
                self.escape.reset();
                self.lex_state = LexState::StringUnicode { key };
                Ok(1)
            }
            LexState::Literal => match self.literal.step(byte) {
                Step::NeedMore => Ok(1),
                Step::Done(literal) => {
                    self.lex_state = LexState::Idle;
                    self.value_done();
                    emit(match literal {
                        Literal::Null => handler.on_null(),
                        Literal::True => handler.on_boolean(true),
                        Literal::False => handler.on_boolean(false),
                    })?;
                    Ok(1)
                }
                Step::Reject => Err(SyntaxError::InvalidLiteral.into()),
            },
            LexState::Number(state) => match state.step(byte)? {
                Some(next) => {
                    self.scratch.push(byte);
                    self.lex_state = LexState::Number(next);
                    Ok(1)
                }
                None => {
                    self.finish_number(handler, state)?;
                    Ok(0)
                }
            },
            LexState::Comment(comment) => {
                self.lex_state = match (comment, byte) {
                    (Comment::Open, b'/') => LexState::Comment(Comment::Line),
                    (Comment::Open, b'*') => LexState::Comment(Comment::Block),
                    (Comment::Open, _) => return Err(SyntaxError::InvalidChar.into()),
                    (Comment::Line, b'\n') => LexState::Idle,
                    (Comment::Line, _) => LexState::Comment(Comment::Line),
                    (Comment::Block | Comment::BlockStar, b'*') => {
                        LexState::Comment(Comment::BlockStar)
                    }
                    (Comment::BlockStar, b'/') => LexState::Idle,
                    (Comment::Block | Comment::BlockStar, _) => LexState::Comment(Comment::Block),
                };
                Ok(1)
            }
            LexState::Garbage => Ok(rest.len()),
        }
    }

    fn between_tokens<H: LexHandler + ?Sized>(&mut self, handler: &mut H, byte: u8) -> Result<(), Halt> {
        match byte {
            b' ' | b'\t' | b'\n' | b'\r' => return Ok(()),
            b'/' if self.options.allow_comments => {
                self.lex_state = LexState::Comment(Comment::Open);
                return Ok(());
            }
            b'/' => return Err(SyntaxError::CommentsDisabled.into()),
            _ => {}
        }

        match self.parse_state {
            ParseState::End if self.options.allow_multiple_values => {
                self.parse_state = ParseState::Start;
                self.begin_value(handler, byte)
            }
            ParseState::End if self.options.allow_trailing_garbage => {
                self.lex_state = LexState::Garbage;
                Ok(())
            }
            ParseState::End => Err(SyntaxError::TrailingGarbage.into()),
            ParseState::Start | ParseState::ArrayNeedValue | ParseState::ObjectNeedValue => {
                self.begin_value(handler, byte)
            }
            ParseState::ArrayFirst if byte == b']' => self.close(handler, Container::Array),
            ParseState::ArrayFirst => self.begin_value(handler, byte),
            ParseState::ObjectFirst | ParseState::ObjectNeedKey => match byte {
                b'"' => {
                    self.begin_string(true);
                    Ok(())
                }
                b'}' if self.parse_state == ParseState::ObjectFirst => {
                    self.close(handler, Container::Object)
                }
                b'}' => Err(SyntaxError::UnexpectedToken.into()),
                _ => Err(SyntaxError::InvalidKey.into()),
            },
            ParseState::ObjectColon => match byte {
                b':' => {
                    self.parse_state = ParseState::ObjectNeedValue;
                    Ok(())
                }
                _ => Err(SyntaxError::MissingColon.into()),
            },
            ParseState::ObjectAfterValue => match byte {
                b',' => {
                    self.parse_state = ParseState::ObjectNeedKey;
                    Ok(())
                }
                b'}' => self.close(handler, Container::Object),
                _ => Err(SyntaxError::ExpectedCommaOrBrace.into()),
            },
            ParseState::ArrayAfterValue => match byte {
                b',' => {
                    self.parse_state = ParseState::ArrayNeedValue;
                    Ok(())
                }
                b']' => self.close(handler, Container::Array),
                _ => Err(SyntaxError::ExpectedCommaOrBracket.into()),
            },
        }
    }

    fn begin_value<H: LexHandler + ?Sized>(&mut self, handler: &mut H, byte: u8) -> Result<(), Halt> {
        if matches!(byte, b'{' | b'[') && self.containers.len() >= self.options.max_depth {
            return Err(SyntaxError::NestingTooDeep.into());
        }
        match byte {
            b'{' => {
                self.containers.push(Container::Object);
                self.parse_state = ParseState::ObjectFirst;
                emit(handler.on_start_map())
            }
            b'[' => {
                self.containers.push(Container::Array);
                self.parse_state = ParseState::ArrayFirst;
                emit(handler.on_start_array())
            }
            b'"' => {
                self.begin_string(false);
                Ok(())
            }
            b't' | b'f' | b'n' => {
                self.literal = ExpectedLiteralBuffer::new(byte);
                self.lex_state = LexState::Literal;
                Ok(())
            }
            b']' | b'}' | b',' | b':' => Err(SyntaxError::UnexpectedToken.into()),
            _ => match NumberState::start(byte) {
                Some(state) => {
                    self.scratch.clear();
                    self.scratch.push(byte);
                    self.lex_state = LexState::Number(state);
                    Ok(())
                }
                None => Err(SyntaxError::InvalidChar.into()),
            },
        }
    }

    fn begin_string(&mut self, key: bool) {
        self.scratch.clear();
        self.lex_state = LexState::String { key };
    }

    fn close<H: LexHandler + ?Sized>(&mut self, handler: &mut H, container: Container) -> Result<(), Halt> {
        let closed = self.containers.pop();
        #[cfg(any(test, feature = "fuzzing"))]
        assert_eq!(closed, Some(container), "closing bracket does not match open container");
        #[cfg(not(any(test, feature = "fuzzing")))]
        let _ = closed;

        self.value_done();
        emit(match container {
            Container::Array => handler.on_end_array(),
            Container::Object => handler.on_end_map(),
        })
    }

    /// Moves the grammar state past a completed value.
    fn value_done(&mut self) {
        self.parse_state = match self.containers.last() {
            None => {
                self.values += 1;
                ParseState::End
            }
            Some(Container::Array) => ParseState::ArrayAfterValue,
            Some(Container::Object) => ParseState::ObjectAfterValue,
        };
    }

    fn finish_string<H: LexHandler + ?Sized>(&mut self, handler: &mut H, key: bool) -> Result<(), Halt> {
        debug_assert!(!self.escape.awaiting_low_surrogate());
        self.lex_state = LexState::Idle;
        if key {
            self.parse_state = ParseState::ObjectColon;
        } else {
            self.value_done();
        }

        let text = core::str::from_utf8(&self.scratch).map_err(|_| SyntaxError::InvalidUtf8)?;
        emit(if key {
            handler.on_map_key(text)
        } else {
            handler.on_string(text)
        })
    }

    fn finish_number<H: LexHandler + ?Sized>(&mut self, handler: &mut H, state: NumberState) -> Result<(), Halt> {
        self.lex_state = LexState::Idle;
        self.value_done();

        let text = core::str::from_utf8(&self.scratch).map_err(|_| SyntaxError::InvalidChar)?;
        emit(match state.parse(text)? {
            Number::Integer(i) => handler.on_integer(i),
            Number::Double(d) => handler.on_double(d),
        })
    }
}

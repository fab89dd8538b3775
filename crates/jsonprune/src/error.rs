//! The error type shared by the tokenizer, the tree builder, and the
//! application callbacks plugged into them.
//!
//! Callbacks report failure with the same [`Error`] the parser itself uses, so
//! an application error travels through the parse untouched: whatever code and
//! message a callback returns is exactly what the caller of
//! [`Tokenizer::feed`](crate::Tokenizer::feed) or
//! [`JsonParser::complete`](crate::JsonParser::complete) observes.
//!
//! ```
//! use jsonprune::{Error, ErrorCode};
//!
//! let err = Error::invalid_argument("unexpected field").context("while reading config");
//! assert_eq!(err.code(), ErrorCode::InvalidArgument);
//! assert_eq!(err.message(), "while reading config: unexpected field");
//! assert_eq!(err.to_string(), "INVALID_ARGUMENT: while reading config: unexpected field");
//! ```
use alloc::{format, string::String};
use core::fmt;

use thiserror::Error;

/// Shorthand for results carrying an [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Broad classification of an [`Error`].
///
/// `Syntax`, `IncompleteDocument` and `EmptyResult` are produced by the parser.
/// The remaining codes are general purpose and exist for callbacks that need to
/// describe why they stopped a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The input is not well-formed JSON.
    Syntax,
    /// Input ended while a value was still open, or no value was ever produced.
    IncompleteDocument,
    /// The document parsed, but the filter discarded the top-level value.
    EmptyResult,
    /// The operation was cancelled by the caller.
    Cancelled,
    /// A value or argument was rejected.
    InvalidArgument,
    /// The operation is not valid in the current state.
    FailedPrecondition,
    /// The operation was aborted.
    Aborted,
    /// A value was outside of its permitted range.
    OutOfRange,
    /// An invariant was broken.
    Internal,
    /// Anything else.
    Unknown,
}

impl ErrorCode {
    /// The canonical upper-case name of the code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Syntax => "SYNTAX",
            ErrorCode::IncompleteDocument => "INCOMPLETE_DOCUMENT",
            ErrorCode::EmptyResult => "EMPTY_RESULT",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::FailedPrecondition => "FAILED_PRECONDITION",
            ErrorCode::Aborted => "ABORTED",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure with a [`code`](Error::code) and a human-readable
/// [`message`](Error::message).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Creates an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for [`ErrorCode::Syntax`].
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Syntax, message)
    }

    /// Shorthand for [`ErrorCode::IncompleteDocument`].
    pub fn incomplete_document(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IncompleteDocument, message)
    }

    /// Shorthand for [`ErrorCode::EmptyResult`].
    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EmptyResult, message)
    }

    /// Shorthand for [`ErrorCode::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// Shorthand for [`ErrorCode::FailedPrecondition`].
    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FailedPrecondition, message)
    }

    /// Shorthand for [`ErrorCode::Aborted`].
    pub fn aborted(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Aborted, message)
    }

    /// Shorthand for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// The broad classification of the failure.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The message, without the code prefix that `Display` adds.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prepends `prefix` to the message, keeping the code.
    #[must_use]
    pub fn context(self, prefix: impl fmt::Display) -> Self {
        Self {
            code: self.code,
            message: format!("{prefix}: {}", self.message),
        }
    }
}

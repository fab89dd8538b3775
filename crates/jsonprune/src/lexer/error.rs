use alloc::{format, string::String};

use bstr::ByteSlice;
use thiserror::Error;

/// Bytes of input shown on each side of a failure position.
const CONTEXT_BYTES: usize = 30;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyntaxError {
    #[error("invalid char in json text")]
    InvalidChar,
    #[error("invalid literal, expected 'true', 'false' or 'null'")]
    InvalidLiteral,
    #[error("invalid character inside string")]
    InvalidStringChar,
    #[error("invalid bytes in UTF8 string")]
    InvalidUtf8,
    #[error("inside a string, '\\' occurs before a character which it may not")]
    InvalidEscape,
    #[error("invalid (non-hex) character occurs after '\\u' inside string")]
    InvalidUnicodeEscape,
    #[error("unpaired UTF-16 surrogate in '\\u' escape")]
    UnpairedSurrogate,
    #[error("malformed number, a digit is required after the minus sign")]
    MissingIntegerDigit,
    #[error("malformed number, a digit is required after the decimal point")]
    MissingFractionDigit,
    #[error("malformed number, a digit is required after the exponent")]
    MissingExponentDigit,
    #[error("malformed number, leading zeros are not allowed")]
    LeadingZero,
    #[error("numeric (floating point) overflow")]
    NumberOverflow,
    #[error("probable comment found in input text, comments are not enabled")]
    CommentsDisabled,
    #[error("unallowed token at this point in JSON text")]
    UnexpectedToken,
    #[error("invalid object key (must be a string)")]
    InvalidKey,
    #[error("object key and value must be separated by a colon (':')")]
    MissingColon,
    #[error("after key and value, inside map, I expect ',' or '}}'")]
    ExpectedCommaOrBrace,
    #[error("after array element, I expect ',' or ']'")]
    ExpectedCommaOrBracket,
    #[error("nesting too deep")]
    NestingTooDeep,
    #[error("trailing garbage")]
    TrailingGarbage,
    #[error("premature EOF")]
    PrematureEof,
}

impl SyntaxError {
    /// Lexical errors concern the bytes of a single token; the rest are
    /// grammar errors about where a token appeared.
    pub fn is_lexical(self) -> bool {
        matches!(
            self,
            SyntaxError::InvalidChar
                | SyntaxError::InvalidLiteral
                | SyntaxError::InvalidStringChar
                | SyntaxError::InvalidUtf8
                | SyntaxError::InvalidEscape
                | SyntaxError::InvalidUnicodeEscape
                | SyntaxError::UnpairedSurrogate
                | SyntaxError::MissingIntegerDigit
                | SyntaxError::MissingFractionDigit
                | SyntaxError::MissingExponentDigit
                | SyntaxError::LeadingZero
                | SyntaxError::NumberOverflow
                | SyntaxError::CommentsDisabled
        )
    }
}

/// A location in the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Bytes consumed so far, over every chunk fed.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    pub(crate) fn advance(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.offset += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if b & 0xC0 != 0x80 {
                // UTF-8 continuation bytes belong to the previous column.
                self.column += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LexError {
    pub kind: SyntaxError,
    pub position: Position,
    /// Index into the chunk being parsed when the error was raised, or `None`
    /// when it was raised at end of input.
    pub chunk_index: Option<usize>,
}

impl LexError {
    /// Renders the error. When the failure happened inside `chunk`, the input
    /// around the failing byte is included with a caret under it.
    pub fn render(&self, chunk: &[u8]) -> String {
        let mut out = format!(
            "{} error: {} (line {}, column {})",
            if self.kind.is_lexical() {
                "lexical"
            } else {
                "parse"
            },
            self.kind,
            self.position.line,
            self.position.column,
        );

        let Some(at) = self.chunk_index.filter(|_| !chunk.is_empty()) else {
            return out;
        };
        let at = at.min(chunk.len());
        let before = printable(&chunk[at.saturating_sub(CONTEXT_BYTES)..at]);
        let after = printable(&chunk[at..(at + CONTEXT_BYTES).min(chunk.len())]);

        out.push_str("\n    ");
        out.push_str(&before);
        out.push_str(&after);
        out.push_str("\n    ");
        out.push_str(&" ".repeat(before.chars().count()));
        out.push('^');
        out
    }
}

/// Lossy UTF-8 with control characters blanked so the caret line stays
/// aligned.
fn printable(bytes: &[u8]) -> String {
    bytes
        .to_str_lossy()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_counts_characters() {
        let mut pos = Position::default();
        pos.advance("[\"é\",\n 1".as_bytes());
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 3);
        assert_eq!(pos.offset, 9);
    }

    #[test]
    fn render_points_at_failure() {
        let err = LexError {
            kind: SyntaxError::UnexpectedToken,
            position: Position {
                offset: 5,
                line: 1,
                column: 6,
            },
            chunk_index: Some(5),
        };
        assert_eq!(
            err.render(br#"{"a":}"#),
            "parse error: unallowed token at this point in JSON text (line 1, column 6)\n    {\"a\":}\n         ^"
        );
    }

    #[test]
    fn render_without_chunk_has_no_context() {
        let err = LexError {
            kind: SyntaxError::PrematureEof,
            position: Position::default(),
            chunk_index: None,
        };
        assert_eq!(err.render(b"[1"), "parse error: premature EOF (line 1, column 1)");
    }
}

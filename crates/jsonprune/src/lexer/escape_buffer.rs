//! Buffering and decoding of `\uXXXX` escape sequences.
//!
//! The [`UnicodeEscapeBuffer`] type accumulates four ASCII hexadecimal digits
//! into a UTF-16 code unit. Because a chunk boundary may fall anywhere inside an
//! escape, digits are fed one at a time and the partial state survives between
//! calls.
//!
//! Code points outside the basic multilingual plane are written in JSON as a
//! surrogate pair (`"\uD83D\uDE00"`). [`UnicodeEscapeBuffer::combine`] keeps the
//! high half until the low half arrives and rejects unpaired halves.
use super::error::SyntaxError;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    unit: u16,
    len: u8,
    high_surrogate: Option<u16>,
}

/// Result of [`UnicodeEscapeBuffer::combine`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Decoded {
    Char(char),
    /// A high surrogate was stored; a `\u` escape with the low half must follow.
    NeedLowSurrogate,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the accumulated digits. A pending high surrogate is kept, since
    /// the escape that starts next is expected to complete it.
    pub fn reset(&mut self) {
        self.unit = 0;
        self.len = 0;
    }

    /// `true` while a high surrogate waits for its low half.
    pub fn awaiting_low_surrogate(&self) -> bool {
        self.high_surrogate.is_some()
    }

    /// Feeds one byte of the four-digit escape. Returns the code unit once the
    /// fourth digit arrives.
    pub fn feed(&mut self, byte: u8) -> Result<Option<u16>, SyntaxError> {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            b'A'..=b'F' => byte - b'A' + 10,
            _ => return Err(SyntaxError::InvalidUnicodeEscape),
        };

        self.unit = (self.unit << 4) | u16::from(digit);
        self.len += 1;

        if self.len == 4 {
            let unit = self.unit;
            self.reset();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }

    /// Turns a decoded code unit into a character, pairing surrogates.
    pub fn combine(&mut self, unit: u16) -> Result<Decoded, SyntaxError> {
        match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                Ok(Decoded::NeedLowSurrogate)
            }
            (Some(high), 0xDC00..=0xDFFF) => {
                let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                char::from_u32(code)
                    .map(Decoded::Char)
                    .ok_or(SyntaxError::UnpairedSurrogate)
            }
            (None, 0xDC00..=0xDFFF) | (Some(_), _) => Err(SyntaxError::UnpairedSurrogate),
            (None, _) => char::from_u32(u32::from(unit))
                .map(Decoded::Char)
                .ok_or(SyntaxError::UnpairedSurrogate),
        }
    }
}

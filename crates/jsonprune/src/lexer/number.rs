//! Number scanning.
//!
//! A number has no terminator of its own: it ends at the first byte that
//! cannot continue it. That byte belongs to the next token, so the lexer
//! re-examines it after the number is emitted. When input ends inside a number
//! the lexer asks [`NumberState::at_end`] whether what it has is complete.
use super::error::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberState {
    /// `-`
    Minus,
    /// `0` or `-0`
    Zero,
    /// `12`
    Integer,
    /// `12.`
    Point,
    /// `12.5`
    Fraction,
    /// `12e`
    Exponent,
    /// `12e-`
    ExponentSign,
    /// `12e-3`
    ExponentInteger,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Integer(i64),
    Double(f64),
}

impl NumberState {
    /// The state after the first byte of a number, if `byte` starts one.
    pub fn start(byte: u8) -> Option<Self> {
        match byte {
            b'-' => Some(NumberState::Minus),
            b'0' => Some(NumberState::Zero),
            b'1'..=b'9' => Some(NumberState::Integer),
            _ => None,
        }
    }

    /// Advances over `byte`. `Ok(None)` means the number ended before `byte`.
    pub fn step(self, byte: u8) -> Result<Option<Self>, SyntaxError> {
        use NumberState::*;

        let next = match (self, byte) {
            (Minus, b'0') => Zero,
            (Minus | Integer, b'1'..=b'9') | (Integer, b'0') => Integer,
            (Zero, b'0'..=b'9') => return Err(SyntaxError::LeadingZero),
            (Zero | Integer, b'.') => Point,
            (Point | Fraction, b'0'..=b'9') => Fraction,
            (Zero | Integer | Fraction, b'e' | b'E') => Exponent,
            (Exponent, b'+' | b'-') => ExponentSign,
            (Exponent | ExponentSign | ExponentInteger, b'0'..=b'9') => ExponentInteger,
            (state, _) => {
                state.at_end()?;
                return Ok(None);
            }
        };
        Ok(Some(next))
    }

    /// Checks that a number in this state is complete.
    pub fn at_end(self) -> Result<(), SyntaxError> {
        match self {
            NumberState::Zero
            | NumberState::Integer
            | NumberState::Fraction
            | NumberState::ExponentInteger => Ok(()),
            NumberState::Minus => Err(SyntaxError::MissingIntegerDigit),
            NumberState::Point => Err(SyntaxError::MissingFractionDigit),
            NumberState::Exponent | NumberState::ExponentSign => {
                Err(SyntaxError::MissingExponentDigit)
            }
        }
    }

    /// Converts the complete text of a number that ended in this state.
    ///
    /// Integers that do not fit in an `i64` are reported as doubles.
    pub fn parse(self, text: &str) -> Result<Number, SyntaxError> {
        if matches!(self, NumberState::Zero | NumberState::Integer) {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Number::Integer(i));
            }
        }

        match text.parse::<f64>() {
            Ok(d) if d.is_finite() => Ok(Number::Double(d)),
            Ok(_) => Err(SyntaxError::NumberOverflow),
            Err(_) => Err(SyntaxError::InvalidChar),
        }
    }
}

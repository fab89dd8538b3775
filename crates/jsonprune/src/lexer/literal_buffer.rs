#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Null,
    True,
    False,
}

/// Outcome of [`ExpectedLiteralBuffer::step`].
pub enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(Literal),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// Matches the rest of `null`, `true` or `false` one byte at a time.
///
/// Holds the bytes still expected, or `None` outside a literal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExpectedLiteralBuffer(Option<(&'static [u8], Literal)>);

impl ExpectedLiteralBuffer {
    /// No literal is in flight
    pub fn none() -> Self {
        ExpectedLiteralBuffer(None)
    }

    /// Start matching after the *first* byte (`n`, `t`, or `f`)
    pub fn new(first: u8) -> Self {
        match first {
            b'n' => ExpectedLiteralBuffer(Some((b"ull", Literal::Null))),
            b't' => ExpectedLiteralBuffer(Some((b"rue", Literal::True))),
            b'f' => ExpectedLiteralBuffer(Some((b"alse", Literal::False))),
            _ => ExpectedLiteralBuffer::none(),
        }
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub fn step(&mut self, byte: u8) -> Step {
        let Some((bytes, literal)) = self.0.take() else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((expected, rest)) if *expected == byte => {
                if rest.is_empty() {
                    Step::Done(literal)
                } else {
                    self.0 = Some((rest, literal));
                    Step::NeedMore
                }
            }
            _ => {
                self.0 = Some((bytes, literal));
                Step::Reject
            }
        }
    }
}

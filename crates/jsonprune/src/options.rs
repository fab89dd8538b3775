#![allow(clippy::struct_excessive_bools)]

/// Configuration options for the tokenizer.
///
/// These options relax the strict JSON grammar the tokenizer enforces by
/// default.
///
/// # Examples
///
/// ```rust
/// use jsonprune::{JsonParser, KeepAll, ParserOptions, Value};
///
/// let options = ParserOptions {
///     allow_comments: true,
///     ..Default::default()
/// };
/// let mut parser = JsonParser::with_options(options, KeepAll);
/// parser.parse(b"[1, /* two */ 2]").unwrap();
/// let value = parser.complete(b"").unwrap();
/// assert_eq!(value, Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
/// ```
///
/// # Default
///
/// The grammar options default to `false`. Nesting is limited to
/// [`DEFAULT_MAX_DEPTH`](Self::DEFAULT_MAX_DEPTH) levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether to accept JavaScript style comments between tokens.
    ///
    /// Both block comments (`/* ... */`) and line comments (`// ...`) are
    /// skipped like whitespace. Comments are never reported as events.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_comments: bool,

    /// Whether to ignore anything that follows the first complete top-level
    /// value.
    ///
    /// When `false`, any non-whitespace input after the top-level value is a
    /// syntax error ("trailing garbage"). When `true`, the tokenizer stops
    /// looking at input once the first value is complete.
    ///
    /// [`allow_multiple_values`](Self::allow_multiple_values) takes precedence
    /// when both are set.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_garbage: bool,

    /// Whether to parse multiple whitespace-separated JSON values from a single
    /// input stream.
    ///
    /// This supports formats such as JSON Lines (JSONL) and newline-delimited
    /// JSON (ND-JSON).
    ///
    /// # Examples
    ///
    /// ```json
    /// {"id": 1}
    /// {"id": 2}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_values: bool,

    /// Deepest container nesting accepted.
    ///
    /// Opening a container while this many are already open
    /// is a syntax error ("nesting too deep"). Dropping, comparing and
    /// formatting a [`Value`](crate::Value) recurse once per level, so this
    /// also bounds their stack use.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`](Self::DEFAULT_MAX_DEPTH)
    pub max_depth: usize,
}

impl ParserOptions {
    /// Nesting limit used by [`ParserOptions::default`].
    pub const DEFAULT_MAX_DEPTH: usize = 128;
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_comments: false,
            allow_trailing_garbage: false,
            allow_multiple_values: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

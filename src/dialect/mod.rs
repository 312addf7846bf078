//! SQLite lexical classes.

/// Lexical classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Bare word: `[A-Za-z_][A-Za-z0-9_]*`. Keywords are not singled out.
    Identifier,
    /// Single- or double-quoted text, quotes included. Double-quoted text
    /// may denote a quoted identifier depending on surrounding grammar;
    /// disambiguation is left to grammar-aware consumers.
    StringLiteral,
    /// `x'...'` / `X'...'` hexadecimal blob, prefix and quotes included.
    BlobLiteral,
    /// A digit followed by a loose run of `[0-9.eE+-]`.
    Number,
    /// Any single character not covered by another class.
    Symbol,
    /// Maximal run of whitespace.
    Whitespace,
    /// `-- ...` line comment (newline excluded) or `/* ... */` block
    /// comment (terminator included).
    Comment,
}

/// Whether `b` can start an identifier.
pub fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Whether `b` can appear in an identifier after the first byte.
pub fn is_identifier_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Whether `b` keeps a numeric literal going. Deliberately loose: the
/// scan consumes `+`/`-` after digits, so `1-2` lexes as one token.
pub fn is_number_continue(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')
}

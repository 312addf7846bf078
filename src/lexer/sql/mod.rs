//! Coarse, lossless SQLite tokenizer fed one chunk at a time, and the
//! statement splitter driving it.
//!
//! The tokenizer classifies spans of text without understanding grammar.
//! Its one hard guarantee is losslessness: concatenating the `raw` text of
//! every emitted token, in order, reproduces the input exactly, no matter
//! where the chunk boundaries fall. Token *granularity* is not stable
//! across chunkings: only quoted literals and block comments carry state
//! over a boundary, so an identifier, number, whitespace run or line
//! comment cut by a boundary is simply emitted as two shorter tokens.

pub use fallible_iterator::FallibleIterator;
use log::debug;
use memchr::memchr;
use memchr::memmem;

use std::collections::VecDeque;
use std::fmt;
use std::mem;

pub use crate::dialect::TokenType;
use crate::dialect::{is_identifier_continue, is_identifier_start, is_number_continue};
use crate::lexer::scan::ChunkSource;

mod error;
#[cfg(test)]
mod test;

pub use error::Error;

/// A classified, lossless span of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical class of the span.
    pub kind: TokenType,
    /// Canonical text. Currently always equal to `raw`; kept as a distinct
    /// field so a future normalization cannot break the reconstruction
    /// contract carried by `raw`.
    pub text: String,
    /// The exact substring of the original input this token covers.
    pub raw: String,
}

impl Token {
    fn new(kind: TokenType, raw: impl Into<String>) -> Token {
        let raw = raw.into();
        Token {
            kind,
            text: raw.clone(),
            raw,
        }
    }

    /// Whether this token is the `;` statement terminator.
    pub fn is_terminator(&self) -> bool {
        self.kind == TokenType::Symbol && self.raw == ";"
    }
}

/// Carry-over state for a token left open at a chunk boundary.
#[derive(Default)]
struct State {
    /// Delimiter of an open quoted literal, if any.
    delimiter: Option<char>,
    in_block_comment: bool,
    /// Raw text accumulated so far for the open token.
    pending: String,
}

/// Incremental tokenizer. One instance per input stream; feed it chunks
/// with [`write`](Tokenizer::write) and flush it once with
/// [`finalize`](Tokenizer::finalize) when the stream is exhausted.
#[derive(Default)]
pub struct Tokenizer {
    state: State,
}

impl Tokenizer {
    /// Create a tokenizer with no open state.
    pub fn new() -> Tokenizer {
        Tokenizer {
            state: State::default(),
        }
    }

    /// Tokenize `chunk` to completion.
    ///
    /// Never fails: a string or block comment left open at the end of the
    /// chunk is buffered and resumed by the next `write` (or flushed by
    /// `finalize`), not reported as an error.
    pub fn write(&mut self, chunk: &str) -> Vec<Token> {
        debug_assert!(!(self.state.in_block_comment && self.state.delimiter.is_some()));
        let mut tokens = Vec::new();
        let mut rest = chunk;
        while !rest.is_empty() {
            if let Some(quote) = self.state.delimiter {
                match string_end(rest.as_bytes(), quote as u8) {
                    Some(end) => {
                        self.state.pending.push_str(&rest[..end]);
                        self.state.delimiter = None;
                        let raw = mem::take(&mut self.state.pending);
                        tokens.push(Token::new(TokenType::StringLiteral, raw));
                        rest = &rest[end..];
                    }
                    None => {
                        self.state.pending.push_str(rest);
                        break;
                    }
                }
                continue;
            }
            if self.state.in_block_comment {
                match memmem::find(rest.as_bytes(), b"*/") {
                    Some(i) => {
                        let end = i + 2;
                        self.state.pending.push_str(&rest[..end]);
                        self.state.in_block_comment = false;
                        let raw = mem::take(&mut self.state.pending);
                        tokens.push(Token::new(TokenType::Comment, raw));
                        rest = &rest[end..];
                    }
                    None => {
                        self.state.pending.push_str(rest);
                        break;
                    }
                }
                continue;
            }
            let amt = self.scan_token(rest, &mut tokens);
            rest = &rest[amt..];
        }
        if !self.state.pending.is_empty() {
            debug!(target: "tokenizer", "open token spans chunk boundary ({} bytes pending)",
                self.state.pending.len());
        }
        tokens
    }

    /// Flush any still-open token at end of input. Call exactly once, after
    /// the last `write`; an unterminated string or block comment is emitted
    /// from whatever text was buffered, and state is reset.
    pub fn finalize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        if self.state.in_block_comment {
            self.state.in_block_comment = false;
            let raw = mem::take(&mut self.state.pending);
            tokens.push(Token::new(TokenType::Comment, raw));
        }
        if self.state.delimiter.take().is_some() {
            let raw = mem::take(&mut self.state.pending);
            tokens.push(Token::new(TokenType::StringLiteral, raw));
        }
        tokens
    }

    /// Scan one token off the front of `data` (non-empty, no open state).
    /// Pushes the token unless the scan left a literal or comment open, and
    /// returns the number of bytes consumed.
    fn scan_token(&mut self, data: &str, tokens: &mut Vec<Token>) -> usize {
        let bytes = data.as_bytes();
        match bytes[0] {
            b'-' if bytes.get(1) == Some(&b'-') => {
                // line comment, newline excluded
                let end = memchr(b'\n', bytes).unwrap_or(bytes.len());
                tokens.push(Token::new(TokenType::Comment, &data[..end]));
                end
            }
            b'/' if bytes.get(1) == Some(&b'*') => match memmem::find(&bytes[2..], b"*/") {
                Some(i) => {
                    let end = 2 + i + 2;
                    tokens.push(Token::new(TokenType::Comment, &data[..end]));
                    end
                }
                None => {
                    self.state.in_block_comment = true;
                    self.state.pending.push_str(data);
                    bytes.len()
                }
            },
            quote @ (b'\'' | b'"') => match string_end(&bytes[1..], quote) {
                Some(i) => {
                    let end = 1 + i;
                    tokens.push(Token::new(TokenType::StringLiteral, &data[..end]));
                    end
                }
                None => {
                    self.state.delimiter = Some(char::from(quote));
                    self.state.pending.push_str(data);
                    bytes.len()
                }
            },
            b'x' | b'X' if bytes.get(1) == Some(&b'\'') => {
                // runs to the closing quote or the end of the chunk; blob
                // literals are not resumed across chunks
                let end = match memchr(b'\'', &bytes[2..]) {
                    Some(i) => 2 + i + 1,
                    None => bytes.len(),
                };
                tokens.push(Token::new(TokenType::BlobLiteral, &data[..end]));
                end
            }
            b'0'..=b'9' => {
                let end = match bytes.iter().skip(1).position(|&b| !is_number_continue(b)) {
                    Some(i) => i + 1,
                    None => bytes.len(),
                };
                tokens.push(Token::new(TokenType::Number, &data[..end]));
                end
            }
            b if is_identifier_start(b) => {
                let end = match bytes
                    .iter()
                    .skip(1)
                    .position(|&b| !is_identifier_continue(b))
                {
                    Some(i) => i + 1,
                    None => bytes.len(),
                };
                tokens.push(Token::new(TokenType::Identifier, &data[..end]));
                end
            }
            _ => match data.find(|c: char| !c.is_whitespace()) {
                Some(0) => {
                    // not whitespace: a single-character symbol
                    let end = data.chars().next().map_or(1, char::len_utf8);
                    tokens.push(Token::new(TokenType::Symbol, &data[..end]));
                    end
                }
                Some(end) => {
                    tokens.push(Token::new(TokenType::Whitespace, &data[..end]));
                    end
                }
                None => {
                    tokens.push(Token::new(TokenType::Whitespace, data));
                    bytes.len()
                }
            },
        }
    }
}

/// Find the end (exclusive) of a quoted span in `data`, which starts just
/// after the opening quote. A doubled quote is an escaped literal and does
/// not close the span. The lookahead never leaves `data`: a quote as its
/// last byte closes the span.
fn string_end(data: &[u8], quote: u8) -> Option<usize> {
    let mut i = 0;
    while let Some(j) = memchr(quote, &data[i..]) {
        let j = i + j;
        if data.get(j + 1) == Some(&quote) {
            // escaped quote
            i = j + 2;
        } else {
            return Some(j + 1);
        }
    }
    None
}

/// An ordered sequence of tokens ending at a terminating `;`, or the final
/// trailing sequence at end of input. Sealed on construction; never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    tokens: Vec<Token>,
}

impl Statement {
    /// The tokens of this statement, in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consume the statement, yielding its tokens.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Reconstruct the statement's SQL text by concatenating each token's
    /// `raw` field.
    pub fn sql(&self) -> String {
        self.tokens.iter().map(|t| t.raw.as_str()).collect()
    }

    /// Whether the statement ends with the `;` terminator. Only the final
    /// statement of an input can be unterminated.
    pub fn is_terminated(&self) -> bool {
        self.tokens.last().is_some_and(Token::is_terminator)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(&token.raw)?;
        }
        Ok(())
    }
}

/// Splits the chunks pulled from `source` into a lazy stream of
/// [`Statement`]s.
///
/// Statements are yielded in the order their closing `;` (or end of input)
/// occurs. Memory held at any time is bounded by one in-flight chunk plus
/// the tokens of the statement(s) being assembled. The stream is not
/// restartable: build a fresh `Splitter` per pass.
pub struct Splitter<S: ChunkSource> {
    source: S,
    tokenizer: Tokenizer,
    /// Tokens of the statement currently being assembled.
    stmt: Vec<Token>,
    /// Statements sealed but not yet handed to the caller.
    ready: VecDeque<Statement>,
    eof: bool,
}

impl<S: ChunkSource> Splitter<S> {
    /// Create a splitter over `source`.
    pub fn new(source: S) -> Splitter<S> {
        Splitter {
            source,
            tokenizer: Tokenizer::new(),
            stmt: Vec::new(),
            ready: VecDeque::new(),
            eof: false,
        }
    }

    fn push_token(&mut self, token: Token) {
        let terminator = token.is_terminator();
        self.stmt.push(token);
        if terminator {
            let stmt = Statement {
                tokens: mem::take(&mut self.stmt),
            };
            debug!(target: "splitter", "statement sealed ({} tokens)", stmt.tokens.len());
            self.ready.push_back(stmt);
        }
    }
}

impl<S: ChunkSource> FallibleIterator for Splitter<S> {
    type Item = Statement;
    type Error = Error;

    fn next(&mut self) -> Result<Option<Statement>, Error> {
        loop {
            // Drain sealed statements before pulling more input, so a slow
            // consumer throttles how far ahead the source is read.
            if let Some(stmt) = self.ready.pop_front() {
                return Ok(Some(stmt));
            }
            if self.eof {
                if self.stmt.is_empty() {
                    return Ok(None);
                }
                // trailing partial statement, emitted once
                return Ok(Some(Statement {
                    tokens: mem::take(&mut self.stmt),
                }));
            }
            match self.source.next_chunk() {
                Ok(Some(chunk)) => {
                    for token in self.tokenizer.write(&chunk) {
                        self.push_token(token);
                    }
                }
                Ok(None) => {
                    self.eof = true;
                    for token in self.tokenizer.finalize() {
                        self.push_token(token);
                    }
                }
                Err(err) => {
                    // a failed read is terminal; unsealed work is never
                    // surfaced
                    self.eof = true;
                    self.stmt.clear();
                    return Err(Error::Io(err));
                }
            }
        }
    }
}

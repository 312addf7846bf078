//! Streaming SQLite tokenizer and statement splitter.
//!
//! Splits large SQL dumps into per-statement token sequences without ever
//! holding the whole input in memory. The lexer is coarse and lossless:
//! concatenating the `raw` text of every emitted token reproduces the
//! input byte-for-byte. It is not a parser: it classifies spans of text,
//! nothing more.
#![warn(missing_docs)]

pub mod dialect;
pub mod lexer;

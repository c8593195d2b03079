//! Token types produced by the lexer.

use std::fmt;

use serde::Serialize;

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TokenKind {
    Eof,
    Literal,
    InterpolationPrefix,
    InterpolationSuffix,
    NestingPrefix,
    NestingSuffix,
    FormatSeparator,
    NestingSeparator,
}

impl TokenKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Literal => "Literal",
            Self::InterpolationPrefix => "InterpolationPrefix",
            Self::InterpolationSuffix => "InterpolationSuffix",
            Self::NestingPrefix => "NestingPrefix",
            Self::NestingSuffix => "NestingSuffix",
            Self::FormatSeparator => "FormatSeparator",
            Self::NestingSeparator => "NestingSeparator",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its byte range in the source string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, start: usize, end: usize) -> Self {
        Self { kind, literal: literal.into(), start, end }
    }

    /// The end-of-input token, positioned at `offset`.
    #[must_use]
    pub const fn eof(offset: usize) -> Self {
        Self { kind: TokenKind::Eof, literal: String::new(), start: offset, end: offset }
    }
}

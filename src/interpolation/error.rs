use thiserror::Error;

use super::token::TokenKind;

/// Errors produced while parsing an interpolation string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A construct expected a literal (key, format or argument) but found
    /// another token.
    #[error("expected Literal after {after}, found {found} at position {start}-{end}")]
    ExpectedLiteral { after: TokenKind, found: TokenKind, start: usize, end: usize },

    /// A token that may only appear inside an interpolation or nesting
    /// construct was found at the top level.
    #[error(
        "'{excerpt}' unexpected token-kind {found} '{literal}' following {} at position {start}-{end}",
        .previous.map_or("start of input", TokenKind::name)
    )]
    UnexpectedToken {
        found: TokenKind,
        literal: String,
        previous: Option<TokenKind>,
        excerpt: String,
        start: usize,
        end: usize,
    },

    /// A nesting argument ran to the end of the input without a suffix.
    #[error("expected NestingSuffix for nesting started at {start}, but reached EOF at {end}")]
    UnterminatedNesting { start: usize, end: usize },

    #[error("expected EOF after {limit} nodes, gave up at {found} at position {start}-{end}")]
    TooManyNodes { limit: usize, found: TokenKind, start: usize, end: usize },
}

impl ParseError {
    /// The kind of the offending token.
    #[must_use]
    pub const fn found(&self) -> TokenKind {
        match self {
            Self::ExpectedLiteral { found, .. }
            | Self::UnexpectedToken { found, .. }
            | Self::TooManyNodes { found, .. } => *found,
            Self::UnterminatedNesting { .. } => TokenKind::Eof,
        }
    }

    /// Byte range of the offending token.
    #[must_use]
    pub const fn span(&self) -> (usize, usize) {
        match self {
            Self::ExpectedLiteral { start, end, .. }
            | Self::UnexpectedToken { start, end, .. }
            | Self::UnterminatedNesting { start, end }
            | Self::TooManyNodes { start, end, .. } => (*start, *end),
        }
    }
}

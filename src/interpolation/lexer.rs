//! Marker-driven lexer.
//!
//! The input is scanned left to right. At every position the configured
//! markers are tried longest first; a hit flushes the pending literal run and
//! emits the marker token. Anything else is literal text, so lexing never
//! fails.

use super::token::{
    Token,
    TokenKind,
};

/// The default markers used by i18next.
pub const I18NEXT_MARKERS: &[(&str, TokenKind)] = &[
    ("{{", TokenKind::InterpolationPrefix),
    ("}}", TokenKind::InterpolationSuffix),
    (",", TokenKind::FormatSeparator),
    ("$t(", TokenKind::NestingPrefix),
    (")", TokenKind::NestingSuffix),
];

/// Ordered set of marker strings and the token kinds they produce.
///
/// Markers are kept sorted by descending length (ties broken lexically), so a
/// marker that is a prefix of another never shadows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<(String, TokenKind)>,
}

impl MarkerSet {
    /// Builds a marker set. Empty markers are ignored; for duplicated marker
    /// strings the first occurrence wins.
    #[must_use]
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = (S, TokenKind)>,
        S: Into<String>,
    {
        let mut unique: Vec<(String, TokenKind)> = Vec::new();
        for (marker, kind) in markers {
            let marker = marker.into();
            if marker.is_empty() || unique.iter().any(|(existing, _)| *existing == marker) {
                continue;
            }
            unique.push((marker, kind));
        }
        unique.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { markers: unique }
    }

    #[must_use]
    pub fn i18next() -> Self {
        Self::new(I18NEXT_MARKERS.iter().copied())
    }

    /// Returns the marker string assigned to `kind`, if any.
    #[must_use]
    pub fn literal_for(&self, kind: TokenKind) -> Option<&str> {
        self.markers.iter().find(|(_, k)| *k == kind).map(|(marker, _)| marker.as_str())
    }

    /// Iterates markers in matching order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenKind)> {
        self.markers.iter().map(|(marker, kind)| (marker.as_str(), *kind))
    }

    /// The marker `rest` starts with, if any.
    fn match_at<'a>(&'a self, rest: &str) -> Option<(&'a str, TokenKind)> {
        self.iter().find(|(marker, _)| rest.starts_with(marker))
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::i18next()
    }
}

/// Splits strings into [`Token`]s according to a [`MarkerSet`].
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    markers: MarkerSet,
}

impl Lexer {
    #[must_use]
    pub const fn new(markers: MarkerSet) -> Self {
        Self { markers }
    }

    #[must_use]
    pub const fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Tokenizes `input`. The result always ends with exactly one EOF token
    /// positioned at `input.len()`.
    #[must_use]
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut literal_start = 0;
        let mut position = 0;

        while let Some(rest) = input.get(position..) {
            if rest.is_empty() {
                break;
            }
            if let Some((marker, kind)) = self.markers.match_at(rest) {
                push_literal(&mut tokens, input, literal_start, position);
                let end = position + marker.len();
                tokens.push(Token::new(kind, marker, position, end));
                position = end;
                literal_start = end;
            } else {
                position += rest.chars().next().map_or(1, char::len_utf8);
            }
        }

        push_literal(&mut tokens, input, literal_start, input.len());
        tokens.push(Token::eof(input.len()));
        tokens
    }
}

/// Emits `input[start..end]` as a literal unless the run is empty.
fn push_literal(tokens: &mut Vec<Token>, input: &str, start: usize, end: usize) {
    if start >= end {
        return;
    }
    if let Some(text) = input.get(start..end) {
        tokens.push(Token::new(TokenKind::Literal, text, start, end));
    }
}

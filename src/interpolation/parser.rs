//! Parser for interpolation strings.
//!
//! Parsing is a pure function of the token stream; the cursor lives on the
//! stack of a single call, so one [`Parser`] can be shared between threads.

use serde::Serialize;

use super::error::ParseError;
use super::lexer::{
    Lexer,
    MarkerSet,
};
use super::token::{
    Token,
    TokenKind,
};

/// Maximum number of top-level nodes accepted for one input.
pub const MAX_NODES: usize = 100;

/// Characters of context shown on each side of a stray token.
const EXCERPT_RADIUS: usize = 10;

/// Marker injected into excerpts at the offending token.
const EXCERPT_MARKER: &str = " ¦ ";

/// A node of the parsed string.
///
/// Literal nodes have no children. Interpolation and nesting nodes carry their
/// key in `left` and an optional format or argument literal in `right`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub token: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<Node>>,
}

impl Node {
    #[must_use]
    pub const fn leaf(token: Token) -> Self {
        Self { token, left: None, right: None }
    }

    #[must_use]
    pub fn is_interpolation(&self) -> bool {
        self.token.kind == TokenKind::InterpolationPrefix
    }

    #[must_use]
    pub fn is_nesting(&self) -> bool {
        self.token.kind == TokenKind::NestingPrefix
    }

    /// Literal text of the left child, untrimmed.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.left.as_deref().map(|left| left.token.literal.as_str())
    }

    /// Literal text of the right child, untrimmed.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        self.right.as_deref().map(|right| right.token.literal.as_str())
    }
}

/// Ordered nodes of one parsed string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ast {
    pub nodes: Vec<Node>,
}

/// Parses strings using a configurable marker set.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    #[must_use]
    pub const fn new(markers: MarkerSet) -> Self {
        Self { lexer: Lexer::new(markers) }
    }

    #[must_use]
    pub const fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// Tokenizes and parses `input`.
    ///
    /// # Errors
    /// Returns a [`ParseError`] when a construct is malformed, a marker token
    /// appears outside a construct, or more than [`MAX_NODES`] nodes are found.
    pub fn parse(&self, input: &str) -> Result<Ast, ParseError> {
        let tokens = self.lexer.tokenize(input);
        parse_tokens(input, &tokens)
    }
}

/// Parses an already tokenized string. `source` is only used for error
/// excerpts.
///
/// # Errors
/// See [`Parser::parse`].
pub fn parse_tokens(source: &str, tokens: &[Token]) -> Result<Ast, ParseError> {
    let mut cursor = Cursor::new(tokens, source.len());
    let mut ast = Ast::default();

    while cursor.current().kind != TokenKind::Eof {
        let token = cursor.current().clone();
        if ast.nodes.len() >= MAX_NODES {
            return Err(ParseError::TooManyNodes {
                limit: MAX_NODES,
                found: token.kind,
                start: token.start,
                end: token.end,
            });
        }

        let node = match token.kind {
            TokenKind::Literal => Node::leaf(token),
            TokenKind::InterpolationPrefix => parse_interpolation(&mut cursor, token)?,
            TokenKind::NestingPrefix => parse_nesting(&mut cursor, token)?,
            _ => {
                return Err(ParseError::UnexpectedToken {
                    found: token.kind,
                    excerpt: excerpt(source, token.start, token.end),
                    previous: ast.nodes.last().map(|node| node.token.kind),
                    literal: token.literal,
                    start: token.start,
                    end: token.end,
                });
            }
        };
        ast.nodes.push(node);
        cursor.advance();
    }

    Ok(ast)
}

/// `{{ key [, format] [}}] `. A missing suffix is tolerated.
fn parse_interpolation(cursor: &mut Cursor<'_>, prefix: Token) -> Result<Node, ParseError> {
    let key = expect_literal(cursor, prefix.kind)?;
    let mut node = Node { token: prefix, left: Some(Box::new(Node::leaf(key))), right: None };

    if cursor.peek().kind == TokenKind::FormatSeparator {
        cursor.advance();
        let format = expect_literal(cursor, TokenKind::FormatSeparator)?;
        node.right = Some(Box::new(Node::leaf(format)));
    }

    if cursor.peek().kind == TokenKind::InterpolationSuffix {
        cursor.advance();
        node.token.end = cursor.current().end;
    }
    Ok(node)
}

/// `$t( key [, argument...] [)]`. Everything between the separator and the
/// suffix is swallowed into one literal, since arguments are commonly JSON.
fn parse_nesting(cursor: &mut Cursor<'_>, prefix: Token) -> Result<Node, ParseError> {
    let key = expect_literal(cursor, prefix.kind)?;
    let mut node = Node { token: prefix, left: Some(Box::new(Node::leaf(key))), right: None };

    if matches!(cursor.peek().kind, TokenKind::NestingSeparator | TokenKind::FormatSeparator) {
        cursor.advance();
        let separator = cursor.current().kind;
        let first = cursor.peek().clone();
        if matches!(
            first.kind,
            TokenKind::NestingSeparator | TokenKind::FormatSeparator | TokenKind::NestingSuffix
        ) {
            return Err(ParseError::ExpectedLiteral {
                after: separator,
                found: first.kind,
                start: first.start,
                end: first.end,
            });
        }

        let mut argument = String::new();
        let mut end = first.start;
        loop {
            let next = cursor.peek();
            match next.kind {
                TokenKind::NestingSuffix => break,
                TokenKind::Eof => {
                    return Err(ParseError::UnterminatedNesting {
                        start: node.token.start,
                        end: next.end,
                    });
                }
                _ => {
                    argument.push_str(&next.literal);
                    end = next.end;
                    cursor.advance();
                }
            }
        }
        node.right = Some(Box::new(Node::leaf(Token::new(
            TokenKind::Literal,
            argument,
            first.start,
            end,
        ))));
    }

    if cursor.peek().kind == TokenKind::NestingSuffix {
        cursor.advance();
        node.token.end = cursor.current().end;
    }
    Ok(node)
}

/// Advances onto the next token if it is a literal.
fn expect_literal(cursor: &mut Cursor<'_>, after: TokenKind) -> Result<Token, ParseError> {
    let next = cursor.peek();
    if next.kind != TokenKind::Literal {
        return Err(ParseError::ExpectedLiteral {
            after,
            found: next.kind,
            start: next.start,
            end: next.end,
        });
    }
    cursor.advance();
    Ok(cursor.current().clone())
}

/// Source text around `start..end` with [`EXCERPT_MARKER`] injected at `start`.
fn excerpt(source: &str, start: usize, end: usize) -> String {
    let mut from = start.saturating_sub(EXCERPT_RADIUS);
    while !source.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = end.saturating_add(EXCERPT_RADIUS).min(source.len());
    while !source.is_char_boundary(to) {
        to += 1;
    }
    let before = source.get(from..start).unwrap_or_default();
    let after = source.get(start..to).unwrap_or_default();
    format!("{before}{EXCERPT_MARKER}{after}")
}

/// One-token lookahead over a token slice. Reads past the end yield EOF.
struct Cursor<'a> {
    tokens: &'a [Token],
    /// Index of the current token.
    index: usize,
    /// Returned for reads past the end.
    eof: Token,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token], length: usize) -> Self {
        Self { tokens, index: 0, eof: Token::eof(length) }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.index + 1).unwrap_or(&self.eof)
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }
}

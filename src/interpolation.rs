//! Tokenizer and parser for the interpolation mini-language embedded in
//! translation values (`{{name}}`, `{{date, short}}`, `$t(other.key)`).

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::ParseError;
pub use lexer::{
    Lexer,
    MarkerSet,
};
pub use parser::{
    Ast,
    MAX_NODES,
    Node,
    Parser,
};
pub use token::{
    Token,
    TokenKind,
};

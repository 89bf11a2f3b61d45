//! Zitp Lexer - tokenizer for zitp programs.
//!
//! Built on `logos`. Identifiers are interned as they are produced, so the
//! parser only ever compares `Name`s.

mod lexer;
mod token;

pub use lexer::{lex, Lexer, TokenList};
pub use token::{Token, TokenKind};

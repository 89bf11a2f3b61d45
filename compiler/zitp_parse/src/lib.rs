//! Zitp Parse - turns a token stream into a [`Program`](zitp_ir::Program).
//!
//! The parser is a plain recursive descent over the grammar below; the first
//! error aborts parsing.
//!
//! ```text
//! program  := stmt*
//! block    := '{' stmt* '}'
//! stmt     := 'var' IDENT (',' IDENT)* ';'
//!           | 'fun' IDENT '(' [IDENT (',' IDENT)*] ')' block
//!           | 'if' expr block ['else' (block | if-stmt)]
//!           | 'while' expr block
//!           | 'return' expr ';'
//!           | 'read' IDENT ';'
//!           | 'print' expr ';'
//!           | ['call'] IDENT '(' args ')' ';'
//!           | IDENT '=' expr ';'
//! expr     := and ('or' and)*
//! and      := not ('and' not)*
//! not      := 'not' not | cmp
//! cmp      := sum [('<' | '>' | '==') sum]
//! sum      := term (('+' | '-') term)*
//! term     := unary (('*' | '/' | '%') unary)*
//! unary    := '-' unary | primary
//! primary  := INT | 'true' | 'false' | IDENT | IDENT '(' args ')' | '(' expr ')'
//! ```

mod error;
mod parser;

pub use error::{ErrorContext, ParseError};
pub use parser::Parser;

use zitp_ir::{Program, StringInterner};

/// Lex and parse `source` into a program.
pub fn parse(source: &str, interner: &StringInterner) -> Result<Program, ParseError> {
    let tokens = zitp_lexer::lex(source, interner);
    Parser::new(&tokens).parse_program()
}

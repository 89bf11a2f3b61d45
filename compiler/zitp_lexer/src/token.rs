//! Token types for the zitp lexer.

use std::fmt;
use zitp_ir::{Name, Span};

/// A token with its span in the source.
#[derive(Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Token kinds for zitp.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    // === Literals ===
    /// Integer literal. Kept wider than `i32` so that `-2147483648`
    /// can be folded by the parser.
    Int(i64),

    // === Identifiers ===
    Ident(Name),

    // === Keywords ===
    Var,
    Fun,
    If,
    Else,
    While,
    Return,
    Read,
    Print,
    Call,
    And,
    Or,
    Not,
    True,
    False,

    // === Punctuation ===
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,

    // === Operators ===
    Assign,
    EqEq,
    Lt,
    Gt,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    /// Unrecognized input.
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable description used in parse errors.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Var => "`var`",
            TokenKind::Fun => "`fun`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::Return => "`return`",
            TokenKind::Read => "`read`",
            TokenKind::Print => "`print`",
            TokenKind::Call => "`call`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Not => "`not`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Assign => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }
}

//! Parse error types.

use thiserror::Error;
use zitp_ir::Span;

/// What the parser was working on when it failed, for
/// "while parsing X" messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    Program,
    Block,
    Declaration,
    FunctionDef,
    IfStatement,
    WhileLoop,
    Statement,
    Expression,
    FunctionCall,
}

impl ErrorContext {
    pub fn description(self) -> &'static str {
        match self {
            ErrorContext::Program => "the program",
            ErrorContext::Block => "a block",
            ErrorContext::Declaration => "a variable declaration",
            ErrorContext::FunctionDef => "a function definition",
            ErrorContext::IfStatement => "an if statement",
            ErrorContext::WhileLoop => "a while loop",
            ErrorContext::Statement => "a statement",
            ErrorContext::Expression => "an expression",
            ErrorContext::FunctionCall => "a function call",
        }
    }
}

/// A syntax error. Parsing stops at the first one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message} while parsing {}", .context.description())]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub context: ErrorContext,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span, context: ErrorContext) -> Self {
        ParseError {
            message: message.into(),
            span,
            context,
        }
    }
}

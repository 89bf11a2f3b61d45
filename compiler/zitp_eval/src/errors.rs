//! Evaluation errors.
//!
//! Every failure is fatal for the run: the interpreter stops at the first
//! error and hands it back to the caller instead of exiting.

use thiserror::Error;
use zitp_ir::Span;

/// Result of evaluating an expression or statement.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalErrorKind {
    #[error("unbound variable `{name}`")]
    UnboundVariable { name: String },

    #[error("type mismatch in {context}: expected {expected}, found {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
        context: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("`{name}` takes {expected} argument(s) but {got} were supplied")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("cannot return a {got}")]
    InvalidReturn { got: &'static str },

    #[error("i/o failure: {message}")]
    IoFailure { message: String },

    #[error("scope invariant violated: {detail}")]
    ScopeInvariant { detail: String },
}

/// An evaluation error with the location of the offending node, when known.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach `span` unless a more precise one is already present.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

// Constructors

pub fn unbound_variable(name: &str) -> EvalError {
    EvalErrorKind::UnboundVariable {
        name: name.to_string(),
    }
    .into()
}

pub fn type_mismatch(expected: &'static str, got: &'static str, context: &'static str) -> EvalError {
    EvalErrorKind::TypeMismatch {
        expected,
        got,
        context,
    }
    .into()
}

pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    }
    .into()
}

pub fn invalid_return(got: &'static str) -> EvalError {
    EvalErrorKind::InvalidReturn { got }.into()
}

pub fn io_failure(message: impl Into<String>) -> EvalError {
    EvalErrorKind::IoFailure {
        message: message.into(),
    }
    .into()
}

pub fn scope_invariant(detail: impl Into<String>) -> EvalError {
    EvalErrorKind::ScopeInvariant {
        detail: detail.into(),
    }
    .into()
}

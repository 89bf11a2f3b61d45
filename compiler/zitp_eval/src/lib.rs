//! Zitp Eval - tree-walking evaluator for zitp programs.
//!
//! # Architecture
//!
//! - [`ScopeArena`]: every lexical scope of a run, reference counted by hand
//!   and addressed through generational [`ScopeId`]s
//! - [`Value`]: integers, booleans and shared [`Closure`]s
//! - [`Interpreter`]: walks the tree, threading scope holds down and
//!   return values up
//! - [`InputHandler`] / [`OutputHandler`]: the `read` and `print` channels
//!
//! # Example
//!
//! ```ignore
//! let interner = StringInterner::new();
//! let program = zitp_parse::parse("print 2 + 3;", &interner)?;
//! let out = SharedBuffer::new();
//! InterpreterBuilder::new(&program, &interner)
//!     .output(OutputHandler::buffer(out.clone()))
//!     .build()
//!     .run()?;
//! assert_eq!(out.contents(), "5\n");
//! ```

pub mod errors;
mod interpreter;
mod io;
mod operators;
mod scope;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{BlockKind, Interpreter, InterpreterBuilder, RunSummary};
pub use io::{InputHandler, OutputHandler, SharedBuffer};
pub use operators::evaluate_binary;
pub use scope::{Collapse, ScopeArena, ScopeError, ScopeId, ScopeStats};
pub use value::{Closure, Value};

#[cfg(test)]
mod tests;

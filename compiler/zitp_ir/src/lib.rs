//! Zitp IR - shared data structures for the zitp interpreter.
//!
//! This crate contains:
//! - Spans for source locations
//! - Names for interned identifiers
//! - The syntax tree handed from the parser to the evaluator
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers become `Name(u32)`, compared in O(1)
//! - **No pointers into the tree**: function definitions live in a flat table and
//!   are addressed by `FunctionId(u32)`, so runtime values never borrow the tree

pub mod ast;
mod interner;
mod name;
mod span;

pub use ast::{
    BinaryOp, Block, CallExpr, Expr, ExprKind, FunctionDef, FunctionId, Program, Stmt, StmtKind,
};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{LineCol, Span, SpanError};

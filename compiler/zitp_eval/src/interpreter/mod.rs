//! Tree-walking interpreter.
//!
//! Evaluation recurses on the host stack, one frame per nested block, call
//! and expression. Deeply recursive programs are bounded by the host stack.

mod builder;
mod call;
mod expr;
mod stmt;

pub use builder::InterpreterBuilder;

use tracing::{debug, warn};
use zitp_ir::{Name, Program, Span, StringInterner};

use crate::errors::{scope_invariant, unbound_variable, EvalError, EvalResult};
use crate::io::{InputHandler, OutputHandler};
use crate::scope::{ScopeArena, ScopeError, ScopeStats};
use crate::value::Value;

/// Why a block is being executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// The program's top-level block.
    Root,
    /// A function body: falling off its end yields Integer 0.
    FunctionBody,
    /// The taken branch of an `if`.
    Branch,
    /// One iteration of a `while` body.
    LoopBody,
}

/// How a block finished.
#[derive(Debug)]
pub(crate) enum Flow {
    Normal,
    Return(Value),
}

/// Outcome of a completed run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub scopes: ScopeStats,
    /// Function calls performed, statement and expression forms alike.
    pub calls: u64,
    /// Scopes still alive after the root block released its hold.
    /// Zero for every run that completes.
    pub leaked_scopes: usize,
}

/// Interpreter for one program run.
pub struct Interpreter<'a> {
    program: &'a Program,
    interner: &'a StringInterner,
    scopes: ScopeArena,
    input: InputHandler,
    output: OutputHandler,
    calls: u64,
}

impl<'a> Interpreter<'a> {
    /// Execute the program.
    ///
    /// On error, output written so far is flushed and the run stops; no
    /// further scopes are released.
    pub fn run(&mut self) -> EvalResult<RunSummary> {
        match self.run_root() {
            Ok(()) => self.output.finish()?,
            Err(e) => {
                if let Err(flush) = self.output.flush() {
                    warn!(error = %flush, "could not flush partial output");
                }
                return Err(e);
            }
        }

        let leaked_scopes = self.scopes.teardown();
        let summary = RunSummary {
            scopes: self.scopes.stats(),
            calls: self.calls,
            leaked_scopes,
        };
        debug!(
            created = summary.scopes.created,
            destroyed = summary.scopes.destroyed,
            peak_live = summary.scopes.peak_live,
            calls = summary.calls,
            leaked = summary.leaked_scopes,
            "run finished"
        );
        Ok(summary)
    }

    fn run_root(&mut self) -> EvalResult<()> {
        let program = self.program;
        let root = scoped(self.interner, self.scopes.create(None, 0, true), program.body.span)?;
        // A top-level return ends the run; its value is dropped.
        if let Flow::Return(value) = self.exec_block(&program.body, root, BlockKind::Root)? {
            scoped(self.interner, self.scopes.discard(value), program.body.span)?;
        }
        Ok(())
    }

    /// Scope counters so far.
    pub fn scope_stats(&self) -> ScopeStats {
        self.scopes.stats()
    }

    fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }
}

fn scope_error(interner: &StringInterner, e: ScopeError) -> EvalError {
    match e {
        ScopeError::Unbound(name) => unbound_variable(interner.lookup(name)),
        ScopeError::Invariant(detail) => scope_invariant(detail),
    }
}

/// Lift a scope operation's result, attributing failures to `span`.
fn scoped<T>(interner: &StringInterner, result: Result<T, ScopeError>, span: Span) -> EvalResult<T> {
    result.map_err(|e| scope_error(interner, e).at(span))
}

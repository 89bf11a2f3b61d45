//! Statement execution and the block release protocol.
//!
//! `exec_block` owns one reference on the scope it is handed and releases
//! it exactly once on every exit that is not an error, including a
//! `return` propagating out of a nested block. Callers never release it.
//! The release goes through [`ScopeArena::exit`](crate::ScopeArena::exit),
//! which also marks the scope closed.

use tracing::trace;
use zitp_ir::{Block, Span, Stmt, StmtKind};

use super::{scoped, BlockKind, Flow, Interpreter};
use crate::errors::{invalid_return, EvalResult};
use crate::scope::ScopeId;
use crate::value::Value;

impl<'a> Interpreter<'a> {
    pub(super) fn exec_block(
        &mut self,
        block: &'a Block,
        scope: ScopeId,
        kind: BlockKind,
    ) -> EvalResult<Flow> {
        trace!(scope = %scope, ?kind, "enter block");
        for stmt in &block.stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt, scope)? {
                scoped(self.interner, self.scopes.exit(scope), stmt.span)?;
                return Ok(Flow::Return(value));
            }
        }
        scoped(self.interner, self.scopes.exit(scope), block.span)?;

        Ok(match kind {
            BlockKind::FunctionBody => Flow::Return(Value::Int(0)),
            BlockKind::Root | BlockKind::Branch | BlockKind::LoopBody => Flow::Normal,
        })
    }

    fn exec_stmt(&mut self, stmt: &'a Stmt, scope: ScopeId) -> EvalResult<Flow> {
        match &stmt.kind {
            StmtKind::Declaration(names) => {
                for &name in names {
                    scoped(self.interner, self.scopes.declare(scope, name), stmt.span)?;
                }
            }
            StmtKind::Assign { target, value } => {
                let value = self.eval_expr(value, scope)?;
                scoped(self.interner, self.scopes.assign(scope, *target, value), stmt.span)?;
            }
            StmtKind::Read(target) => {
                let n = self.input.read_integer().map_err(|e| e.at(stmt.span))?;
                scoped(
                    self.interner,
                    self.scopes.assign(scope, *target, Value::Int(n)),
                    stmt.span,
                )?;
            }
            StmtKind::Print(expr) => {
                let n = self.eval_integer(expr, scope, "print")?;
                self.output.write_integer(n).map_err(|e| e.at(stmt.span))?;
            }
            StmtKind::Call(call) => {
                let result = self.call(call, scope)?;
                scoped(self.interner, self.scopes.discard(result), stmt.span)?;
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let taken = if self.eval_boolean(cond, scope, "if condition")? {
                    then_branch
                } else {
                    else_branch
                };
                // One scope for whichever branch runs.
                let branch = self.child_scope(scope, stmt.span)?;
                return self.exec_block(taken, branch, BlockKind::Branch);
            }
            StmtKind::While { cond, body } => {
                while self.eval_boolean(cond, scope, "while condition")? {
                    let iteration = self.child_scope(scope, stmt.span)?;
                    if let Flow::Return(value) =
                        self.exec_block(body, iteration, BlockKind::LoopBody)?
                    {
                        return Ok(Flow::Return(value));
                    }
                }
            }
            StmtKind::Return(expr) => {
                let value = self.eval_expr(expr, scope)?;
                if let Value::Bool(_) = value {
                    return Err(invalid_return(value.type_name()).at(stmt.span));
                }
                return Ok(Flow::Return(value));
            }
            StmtKind::Function(id) => {
                let program = self.program;
                let def = program.function(*id);
                // Declared before capture, so the body can call itself.
                scoped(self.interner, self.scopes.declare(scope, def.name), def.span)?;
                let closure = scoped(self.interner, self.scopes.make_closure(scope, *id), def.span)?;
                scoped(self.interner, self.scopes.assign(scope, def.name, closure), def.span)?;
            }
        }
        Ok(Flow::Normal)
    }

    /// A block scope nested in `scope`, seeing everything `scope` has now.
    fn child_scope(&mut self, scope: ScopeId, span: Span) -> EvalResult<ScopeId> {
        let visible = scoped(self.interner, self.scopes.snapshot_visibility(scope), span)?;
        scoped(self.interner, self.scopes.create(Some(scope), visible, false), span)
    }
}

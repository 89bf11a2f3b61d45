//! Function application.

use std::rc::Rc;

use smallvec::SmallVec;
use tracing::debug;
use zitp_ir::CallExpr;

use super::{scoped, BlockKind, Flow, Interpreter};
use crate::errors::{arity_mismatch, EvalResult};
use crate::scope::ScopeId;
use crate::value::Value;

impl<'a> Interpreter<'a> {
    /// Call `call.callee` with arguments evaluated in `scope`.
    ///
    /// The callee runs in a fresh call frame whose outer scope is the one the
    /// function was defined in, capped at what was visible at definition.
    pub(super) fn call(&mut self, call: &'a CallExpr, scope: ScopeId) -> EvalResult<Value> {
        let callee = scoped(self.interner, self.scopes.lookup(scope, call.callee), call.span)?;
        let closure = Rc::clone(callee.as_function("call").map_err(|e| e.at(call.span))?);

        let program = self.program;
        let def = program.function(closure.function);
        if def.params.len() != call.args.len() {
            return Err(arity_mismatch(
                self.name(call.callee),
                def.params.len(),
                call.args.len(),
            )
            .at(call.span));
        }

        // Arguments are evaluated in the caller, left to right, before any binding.
        let mut args: SmallVec<[Value; 4]> = SmallVec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(arg, scope)?);
        }

        let frame = scoped(
            self.interner,
            self.scopes
                .create(Some(closure.scope), closure.visible, true),
            call.span,
        )?;
        for (&param, value) in def.params.iter().zip(args) {
            scoped(self.interner, self.scopes.declare(frame, param), call.span)?;
            scoped(self.interner, self.scopes.assign(frame, param, value), call.span)?;
        }

        self.calls = self.calls.saturating_add(1);
        debug!(function = self.name(call.callee), frame = %frame, "call");

        let result = match self.exec_block(&def.body, frame, BlockKind::FunctionBody)? {
            Flow::Return(value) => value,
            Flow::Normal => Value::Int(0),
        };
        scoped(self.interner, self.scopes.discard(callee), call.span)?;
        Ok(result)
    }
}

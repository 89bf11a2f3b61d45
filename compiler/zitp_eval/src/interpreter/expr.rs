//! Expression evaluation.

use zitp_ir::{BinaryOp, Expr, ExprKind};

use super::{scoped, Interpreter};
use crate::errors::EvalResult;
use crate::operators::{evaluate_binary, operator_context};
use crate::scope::ScopeId;
use crate::value::Value;

impl<'a> Interpreter<'a> {
    /// Evaluate `expr` in `scope`.
    ///
    /// A function-valued result holds a reference on its defining scope
    /// until the caller stores or discards it.
    pub(super) fn eval_expr(&mut self, expr: &'a Expr, scope: ScopeId) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::Number(n) => Ok(Value::Int(*n)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Var(name) => {
                scoped(self.interner, self.scopes.lookup(scope, *name), expr.span)
            }
            ExprKind::Not(operand) => {
                let value = self.eval_boolean(operand, scope, "negation")?;
                Ok(Value::Bool(!value))
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right, scope),
            ExprKind::Apply(call) => self.call(call, scope),
        }
    }

    fn eval_binary(
        &mut self,
        op: BinaryOp,
        left: &'a Expr,
        right: &'a Expr,
        scope: ScopeId,
    ) -> EvalResult<Value> {
        let context = operator_context(op);
        if op.is_short_circuit() {
            let l = self.eval_boolean(left, scope, context)?;
            // `and` stops on false, `or` stops on true
            if l == (op == BinaryOp::Or) {
                return Ok(Value::Bool(l));
            }
            let r = self.eval_boolean(right, scope, context)?;
            return Ok(Value::Bool(r));
        }

        let l = self.eval_integer(left, scope, context)?;
        let r = self.eval_integer(right, scope, context)?;
        evaluate_binary(op, l, r).map_err(|e| e.at(left.span.merge(right.span)))
    }

    pub(super) fn eval_integer(
        &mut self,
        expr: &'a Expr,
        scope: ScopeId,
        context: &'static str,
    ) -> EvalResult<i32> {
        let value = self.eval_expr(expr, scope)?;
        value.as_integer(context).map_err(|e| e.at(expr.span))
    }

    pub(super) fn eval_boolean(
        &mut self,
        expr: &'a Expr,
        scope: ScopeId,
        context: &'static str,
    ) -> EvalResult<bool> {
        let value = self.eval_expr(expr, scope)?;
        value.as_boolean(context).map_err(|e| e.at(expr.span))
    }
}
